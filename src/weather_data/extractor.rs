use crate::types::rejected_row::{RejectedRow, RowError};
use crate::types::weather_record::{parse_iso_timestamp, WeatherRecord};
use crate::utils::{cast_column, has_column};
use crate::weather_data::error::WeatherDataError;
use chrono::{DateTime, Utc};
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;

pub const COL_DT: &str = "dt";
pub const COL_DT_ISO: &str = "dt_iso";
pub const COL_TEMP: &str = "temp";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_WIND_SPEED: &str = "wind_speed";
pub const COL_RAIN_1H: &str = "rain_1h";
pub const COL_ICON: &str = "weather_icon";
pub const COL_DESCRIPTION: &str = "weather_description";

/// The typed result of loading one weather source.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeatherSeries {
    /// File path or URL the rows came from.
    pub source: String,
    pub records: Vec<WeatherRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl WeatherSeries {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

enum TimestampColumn {
    Epoch(Int64Chunked),
    Iso(StringChunked),
}

impl TimestampColumn {
    fn get(&self, row: usize) -> Result<DateTime<Utc>, RowError> {
        match self {
            TimestampColumn::Epoch(ca) => {
                let secs = ca.get(row).ok_or(RowError::MissingField(COL_DT))?;
                DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| RowError::InvalidTimestamp(secs.to_string()))
            }
            TimestampColumn::Iso(ca) => {
                let text = ca.get(row).ok_or(RowError::MissingField(COL_DT_ISO))?;
                parse_iso_timestamp(text)
                    .ok_or_else(|| RowError::InvalidTimestamp(text.to_string()))
            }
        }
    }
}

fn typed_column(
    df: &DataFrame,
    source_name: &str,
    name: &str,
    dtype: &DataType,
) -> Result<Column, WeatherDataError> {
    cast_column(df, name, dtype)
        .ok_or_else(|| WeatherDataError::MissingColumn {
            source_name: source_name.to_string(),
            column: name.to_string(),
        })?
        .map_err(|e| WeatherDataError::ColumnType {
            source_name: source_name.to_string(),
            column: name.to_string(),
            source: e,
        })
}

fn float_column(
    df: &DataFrame,
    source_name: &str,
    name: &str,
) -> Result<Float64Chunked, WeatherDataError> {
    let column = typed_column(df, source_name, name, &DataType::Float64)?;
    Ok(column.f64()?.clone())
}

fn string_column(
    df: &DataFrame,
    source_name: &str,
    name: &str,
) -> Result<StringChunked, WeatherDataError> {
    let column = typed_column(df, source_name, name, &DataType::String)?;
    Ok(column.str()?.clone())
}

fn timestamp_column(
    df: &DataFrame,
    source_name: &str,
) -> Result<TimestampColumn, WeatherDataError> {
    if has_column(df, COL_DT) {
        let column = typed_column(df, source_name, COL_DT, &DataType::Int64)?;
        return Ok(TimestampColumn::Epoch(column.i64()?.clone()));
    }
    if has_column(df, COL_DT_ISO) {
        return Ok(TimestampColumn::Iso(string_column(df, source_name, COL_DT_ISO)?));
    }
    Err(WeatherDataError::MissingTimestampColumn(source_name.to_string()))
}

/// The required and optional weather columns, cast to their record types.
struct WeatherColumns {
    timestamps: TimestampColumn,
    temp: Float64Chunked,
    humidity: Float64Chunked,
    wind_speed: Float64Chunked,
    rain: Option<Float64Chunked>,
    icon: StringChunked,
    description: StringChunked,
}

impl WeatherColumns {
    fn resolve(df: &DataFrame, source_name: &str) -> Result<Self, WeatherDataError> {
        let rain = if has_column(df, COL_RAIN_1H) {
            Some(float_column(df, source_name, COL_RAIN_1H)?)
        } else {
            None
        };
        Ok(Self {
            timestamps: timestamp_column(df, source_name)?,
            temp: float_column(df, source_name, COL_TEMP)?,
            humidity: float_column(df, source_name, COL_HUMIDITY)?,
            wind_speed: float_column(df, source_name, COL_WIND_SPEED)?,
            rain,
            icon: string_column(df, source_name, COL_ICON)?,
            description: string_column(df, source_name, COL_DESCRIPTION)?,
        })
    }

    fn record(&self, row: usize) -> Result<WeatherRecord, RowError> {
        Ok(WeatherRecord {
            timestamp: self.timestamps.get(row)?,
            temperature: self.temp.get(row).ok_or(RowError::MissingField(COL_TEMP))?,
            humidity: self
                .humidity
                .get(row)
                .ok_or(RowError::MissingField(COL_HUMIDITY))?,
            wind_speed: self
                .wind_speed
                .get(row)
                .ok_or(RowError::MissingField(COL_WIND_SPEED))?,
            precipitation: self.rain.as_ref().and_then(|ca| ca.get(row)).unwrap_or(0.0),
            icon: self
                .icon
                .get(row)
                .ok_or(RowError::MissingField(COL_ICON))?
                .to_string(),
            description: self
                .description
                .get(row)
                .ok_or(RowError::MissingField(COL_DESCRIPTION))?
                .to_string(),
        })
    }
}

/// Converts a weather `DataFrame` into typed records.
///
/// Column-level problems (no `dt`/`dt_iso`, a missing required column, an
/// empty frame) fail the whole source. Row-level problems only drop the row;
/// each dropped row is logged and listed in [`WeatherSeries::rejected`].
pub fn extract_weather_series(
    df: &DataFrame,
    source_name: &str,
) -> Result<WeatherSeries, WeatherDataError> {
    if df.height() == 0 {
        return Err(WeatherDataError::EmptySource(source_name.to_string()));
    }
    let columns = WeatherColumns::resolve(df, source_name)?;

    let mut records = Vec::with_capacity(df.height());
    let mut rejected = Vec::new();
    for row in 0..df.height() {
        match columns.record(row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!("Rejected row {} of {}: {}", row, source_name, reason);
                rejected.push(RejectedRow { row, reason });
            }
        }
    }

    info!(
        "Extracted {} weather records from {} ({} rejected)",
        records.len(),
        source_name,
        rejected.len()
    );

    Ok(WeatherSeries {
        source: source_name.to_string(),
        records,
        rejected,
    })
}
