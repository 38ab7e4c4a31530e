//! Hourly historical weather from the OpenWeather "timemachine" endpoint.

use crate::fetch::error::FetchError;
use crate::fetch::get_checked;
use crate::settings::Settings;
use crate::types::city::City;
use crate::types::weather_record::WeatherRecord;
use chrono::{DateTime, NaiveDate, NaiveTime};
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time;

pub const OPENWEATHER_TIMEMACHINE_URL: &str =
    "https://api.openweathermap.org/data/2.5/onecall/timemachine";

#[derive(Debug, Deserialize)]
struct TimemachineResponse {
    #[serde(default)]
    hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
struct HourlyEntry {
    dt: i64,
    temp: f64,
    humidity: f64,
    wind_speed: f64,
    #[serde(default)]
    rain: Option<Rain>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    icon: String,
    description: String,
}

impl HourlyEntry {
    fn into_record(self) -> Option<WeatherRecord> {
        let timestamp = DateTime::from_timestamp(self.dt, 0)?;
        let (icon, description) = self
            .weather
            .into_iter()
            .next()
            .map(|c| (c.icon, c.description))
            .unwrap_or_default();
        Some(WeatherRecord {
            timestamp,
            temperature: self.temp,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            precipitation: self.rain.map_or(0.0, |r| r.one_hour),
            icon,
            description,
        })
    }
}

/// Parses the `hourly` array of a timemachine response body.
///
/// Missing `rain.1h` means no rain; the first `weather` entry supplies
/// icon and description. Entries with an out-of-range `dt` are dropped.
pub fn parse_hourly(body: &str, url: &str) -> Result<Vec<WeatherRecord>, FetchError> {
    let response: TimemachineResponse =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse {
            url: url.to_string(),
            source: e,
        })?;
    Ok(response
        .hourly
        .into_iter()
        .filter_map(|entry| {
            let dt = entry.dt;
            let record = entry.into_record();
            if record.is_none() {
                warn!("Dropping hourly entry with invalid dt {} from {}", dt, url);
            }
            record
        })
        .collect())
}

pub struct HistoricalWeatherClient {
    api_key: String,
    base_url: String,
    request_delay: Duration,
    client: Client,
}

impl HistoricalWeatherClient {
    pub fn new(api_key: impl Into<String>, request_delay: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENWEATHER_TIMEMACHINE_URL.to_string(),
            request_delay,
            client: Client::new(),
        }
    }

    /// # Errors
    ///
    /// [`FetchError::MissingApiKey`] when the settings carry no key.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let key = settings
            .openweather_api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;
        Ok(Self::new(key, settings.request_delay))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One request for the hours of `day` (midnight UTC) at the city centre.
    pub async fn fetch_day(
        &self,
        city: City,
        day: NaiveDate,
    ) -> Result<Vec<WeatherRecord>, FetchError> {
        let center = city.center();
        let dt = day.and_time(NaiveTime::MIN).and_utc().timestamp();
        let query = [
            ("lat", center.lat().to_string()),
            ("lon", center.lon().to_string()),
            ("dt", dt.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        let response = get_checked(&self.client, &self.base_url, &query).await?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkRequest(self.base_url.clone(), e.without_url()))?;
        parse_hourly(&body, &self.base_url)
    }

    /// Fetches every day from `start_date` to `end_date` inclusive, one
    /// request per day with the configured pause in between. Days that fail
    /// are logged and skipped.
    pub async fn fetch_range(
        &self,
        city: City,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<WeatherRecord> {
        let mut records = Vec::new();
        for (i, day) in start_date
            .iter_days()
            .take_while(|day| *day <= end_date)
            .enumerate()
        {
            if i > 0 {
                time::sleep(self.request_delay).await;
            }
            match self.fetch_day(city, day).await {
                Ok(hours) => records.extend(hours),
                Err(e) => warn!("Failed to load weather for {} on {}: {}", city, day, e),
            }
        }
        info!(
            "Fetched {} hourly records for {} between {} and {}",
            records.len(),
            city,
            start_date,
            end_date
        );
        records
    }
}
