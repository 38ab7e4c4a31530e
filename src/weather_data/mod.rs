//! Loading hourly weather tables into typed [`crate::WeatherRecord`] series.

pub mod clean;
pub mod data_loader;
pub mod error;
pub mod extractor;
pub mod weather_frame;
