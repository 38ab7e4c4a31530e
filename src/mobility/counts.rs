use crate::mobility::columns::{optional_float, read_csv, required_string};
use crate::mobility::error::MobilityError;
use crate::types::city::City;
use crate::types::rejected_row::{RejectedRow, RowError};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use tokio::task;

pub const COL_SITE: &str = "FK_STANDORT";
pub const COL_DATE: &str = "DATUM";
pub const COL_BICYCLE_IN: &str = "VELO_IN";
pub const COL_BICYCLE_OUT: &str = "VELO_OUT";
pub const COL_PEDESTRIAN_IN: &str = "FUSS_IN";
pub const COL_PEDESTRIAN_OUT: &str = "FUSS_OUT";

/// Format of the `DATUM` column, e.g. `2023-01-01T13:15`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One reading of a counting station. Counters a station does not measure
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobilityCount {
    pub site_id: String,
    pub timestamp: DateTime<Utc>,
    pub bicycle_in: Option<f64>,
    pub bicycle_out: Option<f64>,
    pub pedestrian_in: Option<f64>,
    pub pedestrian_out: Option<f64>,
    pub city: City,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CountSeries {
    pub source: String,
    pub counts: Vec<MobilityCount>,
    pub rejected: Vec<RejectedRow>,
}

/// Parses a `DATUM` value. The value carries no zone and is taken as UTC.
pub fn parse_count_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Converts a counts `DataFrame` into [`MobilityCount`]s for `city`.
///
/// `FK_STANDORT` and `DATUM` are required columns. Rows where either is
/// empty, or where `DATUM` does not parse, are rejected and reported.
pub fn extract_counts(
    df: &DataFrame,
    source_name: &str,
    city: City,
) -> Result<CountSeries, MobilityError> {
    if df.height() == 0 {
        return Err(MobilityError::EmptySource(source_name.to_string()));
    }
    let sites = required_string(df, source_name, COL_SITE)?;
    let dates = required_string(df, source_name, COL_DATE)?;
    let bicycle_in = optional_float(df, source_name, COL_BICYCLE_IN)?;
    let bicycle_out = optional_float(df, source_name, COL_BICYCLE_OUT)?;
    let pedestrian_in = optional_float(df, source_name, COL_PEDESTRIAN_IN)?;
    let pedestrian_out = optional_float(df, source_name, COL_PEDESTRIAN_OUT)?;
    let counter =
        |ca: &Option<Float64Chunked>, row: usize| ca.as_ref().and_then(|ca| ca.get(row));

    let mut series = CountSeries {
        source: source_name.to_string(),
        ..Default::default()
    };
    for row in 0..df.height() {
        let parsed = sites
            .get(row)
            .ok_or(RowError::MissingField(COL_SITE))
            .and_then(|site| {
                let text = dates.get(row).ok_or(RowError::MissingField(COL_DATE))?;
                let timestamp = parse_count_timestamp(text)
                    .ok_or_else(|| RowError::InvalidTimestamp(text.to_string()))?;
                Ok((site, timestamp))
            });
        match parsed {
            Ok((site, timestamp)) => series.counts.push(MobilityCount {
                site_id: site.to_string(),
                timestamp,
                bicycle_in: counter(&bicycle_in, row),
                bicycle_out: counter(&bicycle_out, row),
                pedestrian_in: counter(&pedestrian_in, row),
                pedestrian_out: counter(&pedestrian_out, row),
                city,
            }),
            Err(reason) => {
                warn!("Rejected row {} of {}: {}", row, source_name, reason);
                series.rejected.push(RejectedRow { row, reason });
            }
        }
    }
    Ok(series)
}

/// Loads a counting-station CSV for `city`. Parsing runs on the blocking pool.
///
/// # Errors
///
/// Fails when the file is missing, unreadable, empty or lacks `FK_STANDORT`
/// or `DATUM`. Bad rows do not fail the load.
pub async fn load_counts(path: &Path, city: City) -> Result<CountSeries, MobilityError> {
    let path_buf = path.to_path_buf();
    let series = task::spawn_blocking(move || {
        let df = read_csv(&path_buf)?;
        extract_counts(&df, &path_buf.display().to_string(), city)
    })
    .await??;
    info!(
        "Loaded {} mobility counts for {} from {} ({} rejected)",
        series.counts.len(),
        city,
        path.display(),
        series.rejected.len()
    );
    Ok(series)
}
