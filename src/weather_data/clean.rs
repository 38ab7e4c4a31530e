//! Consistency checks for an hourly weather series before it is joined or
//! displayed.

use crate::types::time_window::floor_to_hour;
use crate::types::weather_record::WeatherRecord;
use chrono::{Datelike, NaiveDate};
use log::{info, warn};

/// Result of [`deduplicate_hours`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dedup {
    pub records: Vec<WeatherRecord>,
    /// Records dropped because their hour was already covered.
    pub duplicates: Vec<WeatherRecord>,
}

/// Keeps the first record of every hour.
///
/// Input is expected in chronological order; a record whose hour is not
/// strictly after the hour of the last kept one counts as a duplicate.
pub fn deduplicate_hours(records: &[WeatherRecord]) -> Dedup {
    let mut dedup = Dedup::default();
    for record in records {
        match dedup.records.last() {
            Some(last) if floor_to_hour(record.timestamp) <= floor_to_hour(last.timestamp) => {
                dedup.duplicates.push(record.clone());
            }
            _ => dedup.records.push(record.clone()),
        }
    }
    if !dedup.duplicates.is_empty() {
        warn!("Dropped {} duplicate hourly records", dedup.duplicates.len());
    }
    dedup
}

/// How many hours of a calendar year a series covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub expected: usize,
    pub present: usize,
    pub missing: usize,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

fn hours_in_year(year: i32) -> usize {
    let days = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days(),
        _ => 0,
    };
    days as usize * 24
}

/// Counts the distinct hours of `year` present in `records`.
pub fn check_coverage(records: &[WeatherRecord], year: i32) -> Coverage {
    let expected = hours_in_year(year);
    let mut hours: Vec<i64> = records
        .iter()
        .filter(|r| r.timestamp.year() == year)
        .map(|r| r.timestamp.timestamp().div_euclid(3600))
        .collect();
    hours.sort_unstable();
    hours.dedup();

    let present = hours.len();
    let coverage = Coverage {
        expected,
        present,
        missing: expected.saturating_sub(present),
    };
    if coverage.is_complete() {
        info!("Series covers all {} hours of {}", expected, year);
    } else {
        warn!(
            "Series covers {} of {} hours in {} ({} missing)",
            present, expected, year, coverage.missing
        );
    }
    coverage
}
