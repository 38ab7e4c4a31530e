use crate::types::weather_record::WeatherRecord;
use chrono::DateTime;

pub(crate) fn record_at(timestamp: i64, temperature: f64) -> WeatherRecord {
    WeatherRecord {
        timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(),
        temperature,
        humidity: 80.0,
        wind_speed: 2.0,
        precipitation: 0.0,
        icon: "01d".to_string(),
        description: "clear sky".to_string(),
    }
}

/// `count` consecutive hourly records from `start`; `temperature(i)` gives
/// the temperature of the i-th hour.
pub(crate) fn hourly_records(
    start: i64,
    count: usize,
    temperature: impl Fn(usize) -> f64,
) -> Vec<WeatherRecord> {
    (0..count)
        .map(|i| record_at(start + i as i64 * 3600, temperature(i)))
        .collect()
}
