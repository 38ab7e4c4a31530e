//! Contains the `TimeWindow` type: a closed `[start, end]` interval derived
//! from a start instant plus a duration in [`TimeUnit`]s.

use crate::types::time_unit::TimeUnit;
use crate::windowing::error::WindowError;
use chrono::{DateTime, Duration, Months, Utc};

/// A closed time interval `[start, end]`.
///
/// The end is derived from the start:
///
/// * `Hours`: `start + duration * 3600s`
/// * `Days`: `start + duration * 86400s`
/// * `Months`: `start` advanced by `duration` calendar months. The day of
///   month is clamped to the length of the target month and the time of day
///   is kept, so the resulting span is irregular (28 to 31 days per month).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use swiss_mobility_weather::{TimeUnit, TimeWindow};
///
/// let start = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
/// let window = TimeWindow::new(start, 1, TimeUnit::Months).unwrap();
/// assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: u32,
    pub unit: TimeUnit,
}

impl TimeWindow {
    /// Builds the window starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::EndOutOfRange`] if the end instant cannot be
    /// represented.
    pub fn new(start: DateTime<Utc>, duration: u32, unit: TimeUnit) -> Result<Self, WindowError> {
        let end = match unit {
            TimeUnit::Hours => {
                Duration::try_hours(i64::from(duration)).and_then(|d| start.checked_add_signed(d))
            }
            TimeUnit::Days => {
                Duration::try_days(i64::from(duration)).and_then(|d| start.checked_add_signed(d))
            }
            TimeUnit::Months => start.checked_add_months(Months::new(duration)),
        }
        .ok_or(WindowError::EndOutOfRange {
            start,
            duration,
            unit,
        })?;

        Ok(Self {
            start,
            end,
            duration,
            unit,
        })
    }

    /// Builds the window from a start given in epoch seconds.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidTimestamp`] for an out-of-range start and
    /// [`WindowError::EndOutOfRange`] as for [`TimeWindow::new`].
    pub fn from_timestamp(
        start_timestamp: i64,
        duration: u32,
        unit: TimeUnit,
    ) -> Result<Self, WindowError> {
        let start = DateTime::from_timestamp(start_timestamp, 0)
            .ok_or(WindowError::InvalidTimestamp(start_timestamp))?;
        Self::new(start, duration, unit)
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Truncates to the start of the hour.
pub fn floor_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let secs = timestamp.timestamp().div_euclid(3600) * 3600;
    DateTime::from_timestamp(secs, 0).unwrap_or(timestamp)
}
