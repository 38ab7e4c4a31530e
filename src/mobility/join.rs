use crate::mobility::counts::{
    MobilityCount, COL_BICYCLE_IN, COL_BICYCLE_OUT, COL_DATE, COL_PEDESTRIAN_IN,
    COL_PEDESTRIAN_OUT, COL_SITE, DATE_FORMAT,
};
use crate::mobility::error::MobilityError;
use crate::types::city::City;
use crate::types::time_window::floor_to_hour;
use crate::types::weather_record::WeatherRecord;
use crate::weather_data::extractor::{COL_HUMIDITY, COL_RAIN_1H, COL_TEMP, COL_WIND_SPEED};
use bon::Builder;
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use log::info;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::{fs, task};

/// Public holidays observed nationwide, 2023 and 2024.
const SWISS_HOLIDAYS: [(i32, u32, u32); 10] = [
    (2023, 1, 1),
    (2023, 4, 7),
    (2023, 4, 10),
    (2023, 5, 18),
    (2023, 8, 1),
    (2024, 1, 1),
    (2024, 3, 29),
    (2024, 4, 1),
    (2024, 5, 9),
    (2024, 8, 1),
];

pub fn is_swiss_holiday(date: NaiveDate) -> bool {
    SWISS_HOLIDAYS
        .iter()
        .any(|&(y, m, d)| date.year() == y && date.month() == m && date.day() == d)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct JoinOptions {
    /// Fill unmatched weather: precipitation with 0, the rest with the mean
    /// over matched rows.
    #[builder(default)]
    pub fill_missing: bool,
}

/// A count with the weather of its hour. Weather fields are `None` when no
/// observation matched and filling was not requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRow {
    pub count: MobilityCount,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
    pub weekday: Weekday,
    pub hour: u32,
    pub holiday: bool,
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn fill_missing(rows: &mut [JoinedRow]) {
    let temperature = mean(rows.iter().map(|r| r.temperature));
    let humidity = mean(rows.iter().map(|r| r.humidity));
    let wind_speed = mean(rows.iter().map(|r| r.wind_speed));
    for row in rows.iter_mut() {
        row.temperature = row.temperature.or(temperature);
        row.humidity = row.humidity.or(humidity);
        row.wind_speed = row.wind_speed.or(wind_speed);
        row.precipitation = row.precipitation.or(Some(0.0));
    }
}

/// Left-joins counts with the weather of the same city and hour.
///
/// Both sides are matched on the timestamp floored to the hour. When a
/// weather series has several records for one hour the first one is used, so
/// every count yields exactly one row.
pub fn join_hourly(
    counts: &[MobilityCount],
    weather_by_city: &HashMap<City, Vec<WeatherRecord>>,
    options: &JoinOptions,
) -> Vec<JoinedRow> {
    let mut index: HashMap<(City, DateTime<Utc>), &WeatherRecord> = HashMap::new();
    for (city, records) in weather_by_city {
        for record in records {
            index
                .entry((*city, floor_to_hour(record.timestamp)))
                .or_insert(record);
        }
    }

    let mut rows: Vec<JoinedRow> = counts
        .iter()
        .map(|count| {
            let weather = index.get(&(count.city, floor_to_hour(count.timestamp)));
            JoinedRow {
                count: count.clone(),
                temperature: weather.map(|w| w.temperature),
                humidity: weather.map(|w| w.humidity),
                wind_speed: weather.map(|w| w.wind_speed),
                precipitation: weather.map(|w| w.precipitation),
                weekday: count.timestamp.weekday(),
                hour: count.timestamp.hour(),
                holiday: is_swiss_holiday(count.timestamp.date_naive()),
            }
        })
        .collect();

    if options.fill_missing {
        fill_missing(&mut rows);
    }
    let matched = rows.iter().filter(|r| r.temperature.is_some()).count();
    info!("Joined {} counts, {} with weather", rows.len(), matched);
    rows
}

/// Lays the joined rows out as a flat table. Count columns keep their
/// source names, weather columns use the weather file's names.
pub fn joined_to_dataframe(rows: &[JoinedRow]) -> PolarsResult<DataFrame> {
    df!(
        "city" => rows.iter().map(|r| r.count.city.name()).collect::<Vec<_>>(),
        COL_SITE => rows.iter().map(|r| r.count.site_id.as_str()).collect::<Vec<_>>(),
        COL_DATE => rows
            .iter()
            .map(|r| r.count.timestamp.format(DATE_FORMAT).to_string())
            .collect::<Vec<_>>(),
        COL_BICYCLE_IN => rows.iter().map(|r| r.count.bicycle_in).collect::<Vec<_>>(),
        COL_BICYCLE_OUT => rows.iter().map(|r| r.count.bicycle_out).collect::<Vec<_>>(),
        COL_PEDESTRIAN_IN => rows.iter().map(|r| r.count.pedestrian_in).collect::<Vec<_>>(),
        COL_PEDESTRIAN_OUT => rows.iter().map(|r| r.count.pedestrian_out).collect::<Vec<_>>(),
        COL_TEMP => rows.iter().map(|r| r.temperature).collect::<Vec<_>>(),
        COL_HUMIDITY => rows.iter().map(|r| r.humidity).collect::<Vec<_>>(),
        COL_WIND_SPEED => rows.iter().map(|r| r.wind_speed).collect::<Vec<_>>(),
        COL_RAIN_1H => rows.iter().map(|r| r.precipitation).collect::<Vec<_>>(),
        "weekday" => rows.iter().map(|r| weekday_name(r.weekday)).collect::<Vec<_>>(),
        "hour" => rows.iter().map(|r| r.hour).collect::<Vec<_>>(),
        "holiday" => rows.iter().map(|r| r.holiday as i32).collect::<Vec<_>>()
    )
}

/// Writes the joined rows as CSV with a header, creating parent directories.
pub async fn write_joined_csv(rows: &[JoinedRow], path: &Path) -> Result<(), MobilityError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| MobilityError::OutputDirCreation(parent.to_path_buf(), e))?;
    }
    let mut df = joined_to_dataframe(rows)?;
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| MobilityError::CsvWriteIo(path_buf.clone(), e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| MobilityError::CsvWritePolars(path_buf, e))
    })
    .await??;
    info!("Wrote {} joined rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobility::counts::parse_count_timestamp;
    use crate::windowing::test_support::record_at;

    fn count_at(datum: &str, bicycle_in: f64) -> MobilityCount {
        MobilityCount {
            site_id: "2990".to_string(),
            timestamp: parse_count_timestamp(datum).unwrap(),
            bicycle_in: Some(bicycle_in),
            bicycle_out: None,
            pedestrian_in: None,
            pedestrian_out: None,
            city: City::Zurich,
        }
    }

    fn zurich_weather() -> HashMap<City, Vec<WeatherRecord>> {
        // 2023-01-01 00:00 and 01:00 UTC.
        let mut second = record_at(1_672_534_800, 4.0);
        second.precipitation = 0.6;
        second.humidity = 90.0;
        HashMap::from([(City::Zurich, vec![record_at(1_672_531_200, 2.0), second])])
    }

    #[test]
    fn counts_match_the_weather_of_their_hour() {
        let counts = vec![
            count_at("2023-01-01T00:45", 3.0),
            count_at("2023-01-01T01:15", 5.0),
        ];
        let rows = join_hourly(&counts, &zurich_weather(), &JoinOptions::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].temperature, Some(2.0));
        assert_eq!(rows[1].temperature, Some(4.0));
        assert_eq!(rows[1].precipitation, Some(0.6));
        assert_eq!(rows[1].hour, 1);
        assert_eq!(rows[0].weekday, Weekday::Sun);
        assert!(rows[0].holiday);
    }

    #[test]
    fn unmatched_rows_keep_empty_weather() {
        let counts = vec![count_at("2023-01-02T09:00", 1.0)];
        let rows = join_hourly(&counts, &zurich_weather(), &JoinOptions::default());

        assert_eq!(rows[0].temperature, None);
        assert_eq!(rows[0].precipitation, None);
        assert!(!rows[0].holiday);
    }

    #[test]
    fn other_city_weather_does_not_match() {
        let mut count = count_at("2023-01-01T00:00", 1.0);
        count.city = City::Bern;
        let rows = join_hourly(&[count], &zurich_weather(), &JoinOptions::default());
        assert_eq!(rows[0].temperature, None);
    }

    #[test]
    fn fill_missing_uses_means_and_zero_rain() {
        let counts = vec![
            count_at("2023-01-01T00:10", 1.0),
            count_at("2023-01-01T01:10", 1.0),
            count_at("2023-01-05T12:00", 1.0),
        ];
        let options = JoinOptions::builder().fill_missing(true).build();
        let rows = join_hourly(&counts, &zurich_weather(), &options);

        assert_eq!(rows[2].temperature, Some(3.0));
        assert_eq!(rows[2].humidity, Some(85.0));
        assert_eq!(rows[2].precipitation, Some(0.0));
        assert_eq!(rows[1].precipitation, Some(0.6));
    }

    #[tokio::test]
    async fn writes_csv_with_header() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mobility_zurich").join("zurich_mobility.csv");
        let rows = join_hourly(
            &[count_at("2023-01-01T00:45", 3.0)],
            &zurich_weather(),
            &JoinOptions::default(),
        );

        write_joined_csv(&rows, &path).await?;
        let written = std::fs::read_to_string(&path)?;
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("city,FK_STANDORT,DATUM,VELO_IN,VELO_OUT,FUSS_IN,FUSS_OUT,temp,humidity,wind_speed,rain_1h,weekday,hour,holiday")
        );
        let data = lines.next().unwrap_or_default();
        assert!(data.starts_with("Zurich,2990,2023-01-01T00:45,3"));
        assert!(data.ends_with(",Sunday,0,1"));
        Ok(())
    }
}
