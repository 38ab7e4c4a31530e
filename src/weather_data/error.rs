use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Weather file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("Parsing error reading CSV data from '{source_name}'")]
    CsvRead {
        source_name: String,
        #[source]
        source: PolarsError,
    },

    #[error("No valid data in '{0}'")]
    EmptySource(String),

    #[error("Missing dt or dt_iso column in '{0}'")]
    MissingTimestampColumn(String),

    #[error("Missing required column '{column}' in '{source_name}'")]
    MissingColumn { source_name: String, column: String },

    #[error("Column '{column}' in '{source_name}' has an unusable type")]
    ColumnType {
        source_name: String,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
