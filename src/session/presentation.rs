//! Pure helpers turning weather values into what a card displays.

use crate::types::time_unit::TimeUnit;
use crate::types::weather_icon::WeatherIcon;
use crate::types::weather_record::WeatherRecord;
use chrono::{DateTime, Utc};

const DEFAULT_EMOJI: &str = ":cloud:";
/// Rain in mm that fills the rain bar.
const MAX_RAIN: f64 = 1.5;
/// Wind in m/s that fills the wind bar.
const MAX_WIND: f64 = 20.0;

pub fn emoji_for(icon: &str) -> &'static str {
    WeatherIcon::from_code(icon).map_or(DEFAULT_EMOJI, |icon| icon.emoji())
}

/// Background colour of the temperature badge.
pub fn temperature_color(temperature: f64) -> &'static str {
    if temperature < 0.0 {
        "#ADD8E6"
    } else if temperature < 10.0 {
        "#90EE90"
    } else if temperature < 20.0 {
        "#FFFFE0"
    } else {
        "#FF6347"
    }
}

/// Rain bar width in percent. Traces below 0.01 mm show as empty.
pub fn rain_bar_width(rain: f64) -> f64 {
    if rain >= 0.01 {
        (rain / MAX_RAIN * 100.0).min(100.0)
    } else {
        0.0
    }
}

pub fn wind_bar_width(wind_speed: f64) -> f64 {
    (wind_speed / MAX_WIND * 100.0).min(100.0)
}

/// One gust symbol per full 5 m/s.
pub fn wind_intensity(wind_speed: f64) -> usize {
    (wind_speed / 5.0).floor().max(0.0) as usize
}

pub fn card_label(timestamp: DateTime<Utc>, unit: TimeUnit) -> String {
    let format = match unit {
        TimeUnit::Hours => "%H:%M",
        TimeUnit::Days => "%d.%m.",
        TimeUnit::Months => "%b",
    };
    timestamp.format(format).to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The one-line summary shown when a card's emoji is opened.
pub fn detail_text(record: &WeatherRecord) -> String {
    format!(
        "{} {}: {} (Temp: {:.1}°C, Humidity: {:.0}%, Wind: {:.1} m/s)",
        emoji_for(&record.icon),
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        capitalize(&record.description),
        record.temperature,
        record.humidity,
        record.wind_speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windowing::test_support::record_at;

    #[test]
    fn unknown_icons_fall_back_to_cloud() {
        assert_eq!(emoji_for("10n"), ":sun_behind_rain_cloud:");
        assert_eq!(emoji_for("99x"), ":cloud:");
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(temperature_color(-0.5), "#ADD8E6");
        assert_eq!(temperature_color(0.0), "#90EE90");
        assert_eq!(temperature_color(19.9), "#FFFFE0");
        assert_eq!(temperature_color(20.0), "#FF6347");
    }

    #[test]
    fn bars_are_scaled_and_capped() {
        assert_eq!(rain_bar_width(0.005), 0.0);
        assert_eq!(rain_bar_width(0.75), 50.0);
        assert_eq!(rain_bar_width(4.0), 100.0);
        assert_eq!(wind_bar_width(5.0), 25.0);
        assert_eq!(wind_bar_width(30.0), 100.0);
        assert_eq!(wind_intensity(4.9), 0);
        assert_eq!(wind_intensity(12.0), 2);
    }

    #[test]
    fn labels_depend_on_unit() {
        let ts = DateTime::from_timestamp(1_675_256_400, 0).unwrap(); // 2023-02-01 13:00
        assert_eq!(card_label(ts, TimeUnit::Hours), "13:00");
        assert_eq!(card_label(ts, TimeUnit::Days), "01.02.");
        assert_eq!(card_label(ts, TimeUnit::Months), "Feb");
    }

    #[test]
    fn detail_text_reads_naturally() {
        let record = record_at(1_672_531_200, 3.14);
        assert_eq!(
            detail_text(&record),
            ":sunny: 2023-01-01 00:00:00: Clear sky (Temp: 3.1°C, Humidity: 80%, Wind: 2.0 m/s)"
        );
    }
}
