//! Typed column access shared by the mobility loaders.

use crate::mobility::error::MobilityError;
use crate::utils::cast_column;
use polars::prelude::*;
use std::path::Path;

pub(crate) fn read_csv(path: &Path) -> Result<DataFrame, MobilityError> {
    if !path.exists() {
        return Err(MobilityError::MissingFile(path.to_path_buf()));
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| MobilityError::CsvRead {
            source_name: path.display().to_string(),
            source: e,
        })
}

fn column_type_error(source_name: &str, name: &str, e: PolarsError) -> MobilityError {
    MobilityError::ColumnType {
        source_name: source_name.to_string(),
        column: name.to_string(),
        source: e,
    }
}

pub(crate) fn required_string(
    df: &DataFrame,
    source_name: &str,
    name: &str,
) -> Result<StringChunked, MobilityError> {
    let column = cast_column(df, name, &DataType::String)
        .ok_or_else(|| MobilityError::MissingColumn {
            source_name: source_name.to_string(),
            column: name.to_string(),
        })?
        .map_err(|e| column_type_error(source_name, name, e))?;
    Ok(column.str()?.clone())
}

pub(crate) fn optional_string(
    df: &DataFrame,
    source_name: &str,
    name: Option<&str>,
) -> Result<Option<StringChunked>, MobilityError> {
    match name.and_then(|n| cast_column(df, n, &DataType::String).map(|c| (n, c))) {
        Some((n, column)) => {
            let column = column.map_err(|e| column_type_error(source_name, n, e))?;
            Ok(Some(column.str()?.clone()))
        }
        None => Ok(None),
    }
}

pub(crate) fn optional_float(
    df: &DataFrame,
    source_name: &str,
    name: &str,
) -> Result<Option<Float64Chunked>, MobilityError> {
    match cast_column(df, name, &DataType::Float64) {
        Some(column) => {
            let column = column.map_err(|e| column_type_error(source_name, name, e))?;
            Ok(Some(column.f64()?.clone()))
        }
        None => Ok(None),
    }
}
