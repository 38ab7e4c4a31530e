//! Runtime configuration: data file locations, cache directory, request pacing
//! and credentials.

use crate::utils::{get_cache_dir, CACHE_DIR_NAME};
use bon::Builder;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BERN_WEATHER_PATH: &str = "arbeit/wetter/bern_23_clean.csv";
pub const DEFAULT_ZURICH_WEATHER_PATH: &str = "arbeit/wetter/zurich_23_clean.csv";
pub const DEFAULT_COUNTER_LOCATIONS_PATH: &str = "arbeit/mobility_zurich/standorte.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "mobility_zurich/zurich_mobility.csv";
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

fn default_cache_dir() -> PathBuf {
    get_cache_dir().unwrap_or_else(|_| env::temp_dir().join(CACHE_DIR_NAME))
}

/// Every field has a default, so `Settings::builder().build()` is usable as-is.
///
/// ```
/// use std::time::Duration;
/// use swiss_mobility_weather::Settings;
///
/// let settings = Settings::builder()
///     .zurich_weather_path("data/zurich.csv")
///     .request_delay(Duration::from_millis(250))
///     .build();
/// assert_eq!(settings.bern_weather_path.to_str(), Some("arbeit/wetter/bern_23_clean.csv"));
/// assert!(settings.openweather_api_key.is_none());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Settings {
    #[builder(into, default = PathBuf::from(DEFAULT_BERN_WEATHER_PATH))]
    pub bern_weather_path: PathBuf,

    #[builder(into, default = PathBuf::from(DEFAULT_ZURICH_WEATHER_PATH))]
    pub zurich_weather_path: PathBuf,

    #[builder(into, default = PathBuf::from(DEFAULT_COUNTER_LOCATIONS_PATH))]
    pub counter_locations_path: PathBuf,

    /// Where the joined mobility/weather table is written.
    #[builder(into, default = PathBuf::from(DEFAULT_OUTPUT_PATH))]
    pub output_path: PathBuf,

    #[builder(into, default = default_cache_dir())]
    pub cache_dir: PathBuf,

    /// Pause between consecutive network requests.
    #[builder(default = DEFAULT_REQUEST_DELAY)]
    pub request_delay: Duration,

    #[builder(into)]
    pub openweather_api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::builder().build()
    }
}

impl Settings {
    /// Defaults, with the API key taken from `OPENWEATHER_API_KEY` when set
    /// and non-empty.
    pub fn from_env() -> Self {
        Settings::builder()
            .maybe_openweather_api_key(env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
            .build()
    }
}
