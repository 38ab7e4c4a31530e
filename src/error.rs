use crate::fetch::error::FetchError;
use crate::geo::error::GeoError;
use crate::mobility::error::MobilityError;
use crate::session::error::SelectionError;
use crate::weather_data::error::WeatherDataError;
use crate::windowing::error::WindowError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwissMobilityWeatherError {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
