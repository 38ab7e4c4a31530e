use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::{extract_weather_series, WeatherSeries};
use crate::weather_data::weather_frame::WeatherLazyFrame;
use log::info;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tokio::task;

/// Reads a CSV file with a header row into a `DataFrame` (blocking).
pub fn read_csv_file(path: &Path) -> Result<DataFrame, WeatherDataError> {
    if !path.exists() {
        return Err(WeatherDataError::MissingFile(path.to_path_buf()));
    }
    let source_name = path.display().to_string();
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| WeatherDataError::CsvRead {
            source_name,
            source: e,
        })
}

/// Parses in-memory CSV bytes with a header row into a `DataFrame` (blocking).
pub fn read_csv_bytes(bytes: Vec<u8>, source_name: &str) -> Result<DataFrame, WeatherDataError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| WeatherDataError::CsvRead {
            source_name: source_name.to_string(),
            source: e,
        })
}

/// Loads and validates a weather CSV file.
///
/// Parsing runs on the blocking thread pool.
///
/// # Errors
///
/// * [`WeatherDataError::MissingFile`] if `path` does not exist.
/// * [`WeatherDataError::CsvRead`] if the file is not valid CSV.
/// * [`WeatherDataError::EmptySource`], [`WeatherDataError::MissingTimestampColumn`]
///   or [`WeatherDataError::MissingColumn`] if the data cannot be used at all.
pub async fn load_weather_csv(path: &Path) -> Result<WeatherSeries, WeatherDataError> {
    let path_buf = path.to_path_buf();
    let series = task::spawn_blocking(move || {
        let df = read_csv_file(&path_buf)?;
        extract_weather_series(&df, &path_buf.display().to_string())
    })
    .await??;
    info!("Loaded {} weather records from {}", series.len(), path.display());
    Ok(series)
}

/// Same as [`load_weather_csv`] for CSV content already in memory, e.g. an
/// upload or a download.
pub async fn load_weather_bytes(
    bytes: Vec<u8>,
    source_name: &str,
) -> Result<WeatherSeries, WeatherDataError> {
    let source_owned = source_name.to_string();
    task::spawn_blocking(move || {
        let df = read_csv_bytes(bytes, &source_owned)?;
        extract_weather_series(&df, &source_owned)
    })
    .await?
}

/// Lazily scans a weather CSV so a window filter can be pushed down before
/// anything is materialised.
pub fn scan_weather_csv(path: &Path) -> Result<WeatherLazyFrame, WeatherDataError> {
    if !path.exists() {
        return Err(WeatherDataError::MissingFile(path.to_path_buf()));
    }
    let frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .map_err(|e| WeatherDataError::CsvRead {
            source_name: path.display().to_string(),
            source: e,
        })?;
    Ok(WeatherLazyFrame::new(frame, &path.display().to_string()))
}
