//! Defines the `WeatherIcon` enum, mapping the short icon codes found in the
//! `weather_icon` column (e.g. `"01d"`) to descriptive variants.

/// Icon code attached to each hourly weather row.
///
/// The two leading digits name the sky condition, the trailing letter tells
/// whether the observation was taken during the day (`d`) or night (`n`).
///
/// ```rust
/// use swiss_mobility_weather::WeatherIcon;
///
/// let icon = WeatherIcon::from_code("10n");
/// assert_eq!(icon, Some(WeatherIcon::RainNight));
/// assert_eq!(WeatherIcon::from_code("99x"), None);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum WeatherIcon {
    /// `01d`: clear sky.
    ClearSkyDay,
    /// `01n`: clear sky.
    ClearSkyNight,
    /// `02d`: few clouds.
    FewCloudsDay,
    /// `02n`: few clouds.
    FewCloudsNight,
    /// `03d`: scattered clouds.
    ScatteredCloudsDay,
    /// `03n`: scattered clouds.
    ScatteredCloudsNight,
    /// `04d`: broken clouds.
    BrokenCloudsDay,
    /// `04n`: broken clouds.
    BrokenCloudsNight,
    /// `09d`: shower rain.
    ShowerRainDay,
    /// `09n`: shower rain.
    ShowerRainNight,
    /// `10d`: rain.
    RainDay,
    /// `10n`: rain.
    RainNight,
    /// `11d`: thunderstorm.
    ThunderstormDay,
    /// `11n`: thunderstorm.
    ThunderstormNight,
    /// `13d`: snow.
    SnowDay,
    /// `13n`: snow.
    SnowNight,
    /// `50d`: mist or fog.
    MistDay,
    /// `50n`: mist or fog.
    MistNight,
}

impl WeatherIcon {
    /// Converts an icon code into a variant. Surrounding whitespace is ignored.
    ///
    /// Returns `None` for codes outside the known set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "01d" => Some(WeatherIcon::ClearSkyDay),
            "01n" => Some(WeatherIcon::ClearSkyNight),
            "02d" => Some(WeatherIcon::FewCloudsDay),
            "02n" => Some(WeatherIcon::FewCloudsNight),
            "03d" => Some(WeatherIcon::ScatteredCloudsDay),
            "03n" => Some(WeatherIcon::ScatteredCloudsNight),
            "04d" => Some(WeatherIcon::BrokenCloudsDay),
            "04n" => Some(WeatherIcon::BrokenCloudsNight),
            "09d" => Some(WeatherIcon::ShowerRainDay),
            "09n" => Some(WeatherIcon::ShowerRainNight),
            "10d" => Some(WeatherIcon::RainDay),
            "10n" => Some(WeatherIcon::RainNight),
            "11d" => Some(WeatherIcon::ThunderstormDay),
            "11n" => Some(WeatherIcon::ThunderstormNight),
            "13d" => Some(WeatherIcon::SnowDay),
            "13n" => Some(WeatherIcon::SnowNight),
            "50d" => Some(WeatherIcon::MistDay),
            "50n" => Some(WeatherIcon::MistNight),
            _ => None,
        }
    }

    pub fn is_daytime(&self) -> bool {
        matches!(
            self,
            WeatherIcon::ClearSkyDay
                | WeatherIcon::FewCloudsDay
                | WeatherIcon::ScatteredCloudsDay
                | WeatherIcon::BrokenCloudsDay
                | WeatherIcon::ShowerRainDay
                | WeatherIcon::RainDay
                | WeatherIcon::ThunderstormDay
                | WeatherIcon::SnowDay
                | WeatherIcon::MistDay
        )
    }

    /// Emoji shortcode used on the weather cards.
    pub fn emoji(&self) -> &'static str {
        match self {
            WeatherIcon::ClearSkyDay => ":sunny:",
            WeatherIcon::ClearSkyNight => ":star2:",
            WeatherIcon::FewCloudsDay => ":sun_small_cloud:",
            WeatherIcon::FewCloudsNight => ":stars:",
            WeatherIcon::ScatteredCloudsDay | WeatherIcon::ScatteredCloudsNight => ":mostly_sunny:",
            WeatherIcon::BrokenCloudsDay | WeatherIcon::BrokenCloudsNight => ":sun_behind_cloud:",
            WeatherIcon::ShowerRainDay | WeatherIcon::ShowerRainNight => ":rain_cloud:",
            WeatherIcon::RainDay => ":partly_sunny_rain:",
            WeatherIcon::RainNight => ":sun_behind_rain_cloud:",
            WeatherIcon::ThunderstormDay | WeatherIcon::ThunderstormNight => ":lightning_cloud:",
            WeatherIcon::SnowDay | WeatherIcon::SnowNight => ":snow_cloud:",
            WeatherIcon::MistDay | WeatherIcon::MistNight => ":fog:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip_day_flag() {
        assert_eq!(WeatherIcon::from_code("01d"), Some(WeatherIcon::ClearSkyDay));
        assert!(WeatherIcon::ClearSkyDay.is_daytime());
        assert!(!WeatherIcon::MistNight.is_daytime());
        assert_eq!(WeatherIcon::from_code(" 13n "), Some(WeatherIcon::SnowNight));
    }

    #[test]
    fn emoji_distinguishes_rain_day_and_night() {
        assert_eq!(WeatherIcon::RainDay.emoji(), ":partly_sunny_rain:");
        assert_eq!(WeatherIcon::RainNight.emoji(), ":sun_behind_rain_cloud:");
        assert_eq!(WeatherIcon::BrokenCloudsNight.emoji(), ":sun_behind_cloud:");
    }
}
