use crate::types::weather_icon::WeatherIcon;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Format of the `dt_iso` column, once the trailing ` UTC` is removed.
const ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One hourly weather observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Millimetres in the last hour. A daily aggregate holds the day's total.
    pub precipitation: f64,
    pub icon: String,
    pub description: String,
}

impl WeatherRecord {
    pub fn weather_icon(&self) -> Option<WeatherIcon> {
        WeatherIcon::from_code(&self.icon)
    }
}

/// Parses a `dt_iso` value such as `2023-01-01 00:00:00 +0000 UTC`.
///
/// The trailing zone name is optional; the numeric offset is required.
pub fn parse_iso_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    let without_zone = trimmed.strip_suffix("UTC").unwrap_or(trimmed).trim_end();
    DateTime::<FixedOffset>::parse_from_str(without_zone, ISO_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_dt_iso_with_zone_suffix() {
        let parsed = parse_iso_timestamp("2023-01-01 05:00:00 +0000 UTC");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2023, 1, 1, 5, 0, 0).unwrap()));
    }

    #[test]
    fn applies_non_zero_offset() {
        let parsed = parse_iso_timestamp("2023-06-01 12:00:00 +0200");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn rejects_missing_offset() {
        assert_eq!(parse_iso_timestamp("2023-01-01 05:00:00"), None);
        assert_eq!(parse_iso_timestamp("yesterday"), None);
    }
}
