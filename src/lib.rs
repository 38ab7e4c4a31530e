//! Hourly weather for Bern and Zurich next to the city's pedestrian and
//! bicycle counts.
//!
//! The core is [`windowing`]: restrict an hourly [`WeatherRecord`] series to a
//! [`TimeWindow`] and reduce it to at most `duration` representative rows.
//! Around it, [`weather_data`] and [`mobility`] load the CSV sources with
//! Polars, [`mobility::join`] lines counts up with the weather of their hour,
//! [`fetch`] downloads fresh data and [`session`] drives the dashboard.
//!
//! ```
//! use swiss_mobility_weather::windowing::representative;
//! use swiss_mobility_weather::{TimeUnit, TimeWindow, WeatherRecord};
//! use chrono::DateTime;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records: Vec<WeatherRecord> = (0..48)
//!     .filter_map(|h| {
//!         Some(WeatherRecord {
//!             timestamp: DateTime::from_timestamp(1_672_531_200 + h * 3600, 0)?,
//!             temperature: h as f64,
//!             humidity: 80.0,
//!             wind_speed: 2.0,
//!             precipitation: 0.0,
//!             icon: "01n".to_string(),
//!             description: "clear sky".to_string(),
//!         })
//!     })
//!     .collect();
//!
//! let window = TimeWindow::from_timestamp(1_672_531_200, 6, TimeUnit::Hours)?;
//! let sample = representative(&records, &window);
//! assert_eq!(sample.len(), 6);
//! assert!(sample.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
//! # Ok(())
//! # }
//! ```

mod error;
mod settings;
mod utils;

pub mod fetch;
pub mod geo;
pub mod mobility;
pub mod session;
pub mod types;
pub mod weather_data;
pub mod windowing;

pub use error::SwissMobilityWeatherError;
pub use settings::*;
pub use utils::{ensure_cache_dir_exists, get_cache_dir};

pub use types::city::{City, CitySelection, LatLon};
pub use types::rejected_row::{RejectedRow, RowError};
pub use types::time_unit::TimeUnit;
pub use types::time_window::TimeWindow;
pub use types::weather_icon::WeatherIcon;
pub use types::weather_record::WeatherRecord;

pub use fetch::error::FetchError;
pub use geo::error::GeoError;
pub use mobility::error::MobilityError;
pub use session::error::SelectionError;
pub use weather_data::error::WeatherDataError;
pub use windowing::error::WindowError;
