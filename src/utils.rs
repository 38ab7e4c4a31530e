use crate::error::SwissMobilityWeatherError;
use log::info;
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use std::io;
use std::path::{Path, PathBuf};

pub(crate) const CACHE_DIR_NAME: &str = "swiss_mobility_weather_cache";

/// The default cache location: `<user cache dir>/swiss_mobility_weather_cache`.
pub fn get_cache_dir() -> Result<PathBuf, SwissMobilityWeatherError> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or_else(|| {
            SwissMobilityWeatherError::CacheDirResolution(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system cache directory",
            ))
        })
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), SwissMobilityWeatherError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(SwissMobilityWeatherError::CacheDirCreation(
            path.to_path_buf(),
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Cache path exists but is not a directory",
            ),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| SwissMobilityWeatherError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(SwissMobilityWeatherError::CacheDirCreation(path.to_path_buf(), e)),
    }
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Casts column `name` to `dtype`. `None` when the column does not exist.
///
/// Values that cannot be converted become null instead of failing the cast.
pub(crate) fn cast_column(
    df: &DataFrame,
    name: &str,
    dtype: &DataType,
) -> Option<PolarsResult<Column>> {
    if !has_column(df, name) {
        return None;
    }
    Some(df.column(name).and_then(|column| column.cast(dtype)))
}

/// The first of `candidates` that exists in `df`.
pub(crate) fn first_present<'a>(df: &DataFrame, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|name| has_column(df, name))
}
