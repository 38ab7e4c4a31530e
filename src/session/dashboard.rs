//! The per-request pipeline behind the dashboard page: pick the weather for
//! the selected city, restrict it to the chosen window, reduce it to a few
//! representative rows and describe the cards and the map to draw.

use crate::mobility::locations::{load_locations, LocationSet};
use crate::session::context::{Marker, Session};
use crate::session::presentation::{
    card_label, detail_text, emoji_for, rain_bar_width, temperature_color, wind_bar_width,
    wind_intensity,
};
use crate::settings::Settings;
use crate::types::city::{City, CitySelection, LatLon};
use crate::types::time_window::TimeWindow;
use crate::types::weather_record::WeatherRecord;
use crate::weather_data::data_loader::load_weather_csv;
use crate::windowing::{filter::filter_window, sampler::sample};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use std::fmt;
use std::path::Path;

const CITY_ZOOM: u8 = 13;
const BOTH_CITIES_ZOOM: u8 = 9;

/// A message shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    Warning(String),
    /// The window holds no weather rows.
    NoData,
    MapUnavailable,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Warning(message) => write!(f, "{}", message),
            Notice::NoData => write!(
                f,
                "No weather data available. Check time range or CSV data."
            ),
            Notice::MapUnavailable => {
                write!(f, "Map not displayed due to missing weather data.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureBadge {
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainBar {
    pub millimetres: f64,
    /// Percent of the full bar.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindBar {
    pub speed: f64,
    pub width: f64,
    pub intensity: usize,
}

/// One column of the weather strip. Optional parts follow the display
/// toggles of the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCard {
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub emoji: Option<&'static str>,
    pub detail: Option<String>,
    pub temperature: Option<TemperatureBadge>,
    pub rain: Option<RainBar>,
    pub wind: Option<WindBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    pub position: LatLon,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub pins: Vec<Pin>,
}

/// Everything needed to draw the page for one render.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardView {
    pub notices: Vec<Notice>,
    pub window: Option<TimeWindow>,
    pub cards: Vec<SampleCard>,
    pub map: Option<MapView>,
    /// The filtered rows, when the data table is switched on.
    pub table: Option<Vec<WeatherRecord>>,
}

/// Loaded data sources shared by all sessions. Sources that failed to load
/// are `None` and produce a notice on every render.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    bern: Option<Vec<WeatherRecord>>,
    zurich: Option<Vec<WeatherRecord>>,
    locations: Option<LocationSet>,
    load_notices: Vec<Notice>,
}

async fn load_weather_source(path: &Path, notices: &mut Vec<Notice>) -> Option<Vec<WeatherRecord>> {
    match load_weather_csv(path).await {
        Ok(series) if !series.is_empty() => Some(series.records),
        Ok(_) => {
            notices.push(Notice::Warning(format!(
                "No valid data in {}.",
                path.display()
            )));
            None
        }
        Err(e) => {
            warn!("Could not load weather from {}: {}", path.display(), e);
            notices.push(Notice::Warning(format!(
                "Error loading {}: {}",
                path.display(),
                e
            )));
            None
        }
    }
}

impl Dashboard {
    pub fn new(
        bern: Option<Vec<WeatherRecord>>,
        zurich: Option<Vec<WeatherRecord>>,
        locations: Option<LocationSet>,
    ) -> Self {
        Self {
            bern,
            zurich,
            locations,
            load_notices: Vec::new(),
        }
    }

    /// Loads both weather files and the counter locations named in
    /// `settings`. A source that cannot be loaded is left out and reported
    /// as a notice instead of failing.
    pub async fn load(settings: &Settings) -> Self {
        let mut notices = Vec::new();
        let bern = load_weather_source(&settings.bern_weather_path, &mut notices).await;
        let zurich = load_weather_source(&settings.zurich_weather_path, &mut notices).await;
        let locations = match load_locations(&settings.counter_locations_path).await {
            Ok(set) => Some(set),
            Err(e) => {
                warn!("Could not load counter locations: {}", e);
                notices.push(Notice::Warning(format!(
                    "Error loading {}: {}",
                    settings.counter_locations_path.display(),
                    e
                )));
                None
            }
        };
        Self {
            bern,
            zurich,
            locations,
            load_notices: notices,
        }
    }

    fn weather(&self, city: City) -> Option<&Vec<WeatherRecord>> {
        match city {
            City::Bern => self.bern.as_ref(),
            City::Zurich => self.zurich.as_ref(),
        }
    }

    /// The weather for `selection`, or `None` if any selected source is
    /// missing. Both cities are merged in timestamp order; equal timestamps
    /// keep Bern before Zurich.
    pub fn weather_for(&self, selection: CitySelection) -> Option<Vec<WeatherRecord>> {
        let mut combined = Vec::new();
        for city in selection.cities() {
            combined.extend(self.weather(city)?.iter().cloned());
        }
        if selection == CitySelection::Both {
            combined.sort_by_key(|r| r.timestamp);
        }
        Some(combined)
    }

    fn markers_for(&self, selection: CitySelection) -> Vec<Marker> {
        match selection {
            CitySelection::Single(City::Bern) => vec![Marker::at(City::Bern.center())],
            _ => self
                .locations
                .iter()
                .flat_map(|set| set.positions())
                .map(Marker::at)
                .collect(),
        }
    }

    /// Runs filter, sampling and view building for the session's selection.
    ///
    /// The session's markers are rebuilt whenever weather for the selection
    /// exists, even if the window turns out empty.
    pub fn render(&self, session: &mut Session) -> DashboardView {
        let selection = session.selection().clone();
        let mut view = DashboardView {
            notices: self.load_notices.clone(),
            ..Default::default()
        };

        let Some(weather) = self.weather_for(selection.cities) else {
            view.notices.push(Notice::Warning(format!(
                "No data available for {}. Check CSV files.",
                selection.cities
            )));
            view.notices.push(Notice::MapUnavailable);
            return view;
        };

        let window = match selection.window() {
            Ok(window) => window,
            Err(e) => {
                view.notices.push(Notice::Warning(e.to_string()));
                view.notices.push(Notice::MapUnavailable);
                return view;
            }
        };
        let filtered = filter_window(&weather, &window);
        view.window = Some(window);
        session.replace_markers(self.markers_for(selection.cities));

        if filtered.is_empty() {
            view.notices.push(Notice::NoData);
            view.notices.push(Notice::MapUnavailable);
            return view;
        }

        let toggles = selection.toggles;
        view.cards = sample(&filtered, window.duration, window.unit)
            .iter()
            .map(|record| SampleCard {
                timestamp: record.timestamp,
                label: card_label(record.timestamp, window.unit),
                emoji: toggles.show_summary.then(|| emoji_for(&record.icon)),
                detail: toggles.show_summary.then(|| detail_text(record)),
                temperature: toggles.temperature().then(|| TemperatureBadge {
                    value: record.temperature,
                    color: temperature_color(record.temperature),
                }),
                rain: toggles.rain().then(|| RainBar {
                    millimetres: record.precipitation,
                    width: rain_bar_width(record.precipitation),
                }),
                wind: toggles.wind().then(|| WindBar {
                    speed: record.wind_speed,
                    width: wind_bar_width(record.wind_speed),
                    intensity: wind_intensity(record.wind_speed),
                }),
            })
            .collect();

        view.map = Some(map_view(selection.cities, session));
        if toggles.show_table {
            view.table = Some(filtered);
        }
        view
    }
}

fn map_view(selection: CitySelection, session: &Session) -> MapView {
    let markers = session.markers().to_vec();
    match selection {
        CitySelection::Single(city) => MapView {
            center: city.center(),
            zoom: CITY_ZOOM,
            markers,
            pins: Vec::new(),
        },
        CitySelection::Both => MapView {
            center: City::Bern.center().midpoint(&City::Zurich.center()),
            zoom: BOTH_CITIES_ZOOM,
            markers,
            pins: City::ALL
                .iter()
                .map(|city| Pin {
                    position: city.center(),
                    label: city.name().to_string(),
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobility::locations::CounterLocation;
    use crate::session::selection::{DisplayToggles, Selection};
    use crate::types::time_unit::TimeUnit;
    use crate::windowing::test_support::hourly_records;
    use std::io::Write;

    const JAN_1: i64 = 1_672_531_200;

    fn locations() -> LocationSet {
        LocationSet {
            source: "memory".to_string(),
            locations: vec![CounterLocation {
                site_id: Some("1".to_string()),
                name: None,
                easting: 2_683_009.89,
                northing: 1_247_937.2,
                position: LatLon(47.377, 8.538),
            }],
            rejected: Vec::new(),
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(
            Some(hourly_records(JAN_1, 48, |i| i as f64)),
            Some(hourly_records(JAN_1, 48, |i| -(i as f64))),
            Some(locations()),
        )
    }

    fn session(cities: CitySelection, start: i64, unit: TimeUnit, duration: u32) -> Session {
        let selection = Selection::builder()
            .cities(cities)
            .start(DateTime::from_timestamp(start, 0).unwrap())
            .unit(unit)
            .duration(duration)
            .toggles(
                DisplayToggles::builder()
                    .show_summary(true)
                    .show_temperature(true)
                    .show_table(true)
                    .build(),
            )
            .build();
        Session::start("test", selection)
    }

    #[test]
    fn renders_cards_and_city_map() {
        let mut session = session(CitySelection::Single(City::Zurich), JAN_1, TimeUnit::Hours, 4);
        let view = dashboard().render(&mut session);

        assert!(view.notices.is_empty());
        assert_eq!(view.cards.len(), 4);
        assert_eq!(view.cards[0].label, "00:00");
        assert_eq!(view.cards[0].emoji, Some(":sunny:"));
        assert_eq!(view.cards[1].temperature.as_ref().map(|t| t.color), Some("#ADD8E6"));
        assert!(view.cards[0].rain.is_none());
        assert_eq!(view.table.as_ref().map(Vec::len), Some(5));

        let map = view.map.unwrap();
        assert_eq!(map.zoom, 13);
        assert_eq!(map.center, City::Zurich.center());
        assert_eq!(map.markers.len(), 1);
        assert_eq!(session.markers().len(), 1);
    }

    #[test]
    fn empty_window_gives_no_data_notice_and_no_map() {
        let mut session = session(
            CitySelection::Single(City::Bern),
            JAN_1 + 10 * 86_400,
            TimeUnit::Days,
            2,
        );
        let view = dashboard().render(&mut session);

        assert_eq!(view.notices, vec![Notice::NoData, Notice::MapUnavailable]);
        assert!(view.cards.is_empty());
        assert!(view.map.is_none());
        assert_eq!(session.markers()[0].position, City::Bern.center());
    }

    #[test]
    fn missing_source_is_reported_by_city() {
        let dashboard = Dashboard::new(None, Some(hourly_records(JAN_1, 3, |_| 1.0)), None);
        let mut session = session(CitySelection::Both, JAN_1, TimeUnit::Hours, 3);
        let view = dashboard.render(&mut session);

        assert_eq!(
            view.notices[0],
            Notice::Warning("No data available for both. Check CSV files.".to_string())
        );
        assert!(view.window.is_none());
    }

    #[test]
    fn both_cities_merge_in_time_order_and_center_between_them() {
        let combined = dashboard().weather_for(CitySelection::Both).unwrap();
        assert_eq!(combined.len(), 96);
        assert!(combined.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(combined[0].temperature, 0.0);
        assert_eq!(combined[2].temperature, 1.0);
        assert_eq!(combined[3].temperature, -1.0);

        let mut session = session(CitySelection::Both, JAN_1, TimeUnit::Days, 2);
        let view = dashboard().render(&mut session);
        let map = view.map.unwrap();
        assert_eq!(map.zoom, 9);
        assert_eq!(map.pins.len(), 2);
        assert!((map.center.lat() - 47.16245).abs() < 1e-9);
        assert!((map.center.lon() - 7.99455).abs() < 1e-9);
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].label, "01.01.");
    }

    #[tokio::test]
    async fn load_reports_missing_files_as_notices() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let zurich = dir.path().join("zurich.csv");
        let mut file = std::fs::File::create(&zurich)?;
        file.write_all(
            b"dt,temp,humidity,wind_speed,weather_icon,weather_description\n\
              1672531200,1.0,80,2.0,01n,clear sky\n",
        )?;
        let settings = Settings::builder()
            .bern_weather_path(dir.path().join("missing.csv"))
            .zurich_weather_path(zurich)
            .counter_locations_path(dir.path().join("standorte.csv"))
            .build();

        let dashboard = Dashboard::load(&settings).await;
        assert!(dashboard.weather_for(CitySelection::Single(City::Zurich)).is_some());
        assert!(dashboard.weather_for(CitySelection::Single(City::Bern)).is_none());

        let mut session = session(CitySelection::Single(City::Zurich), JAN_1, TimeUnit::Hours, 2);
        let view = dashboard.render(&mut session);
        let notices: Vec<String> = view.notices.iter().map(|n| n.to_string()).collect();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.starts_with("Error loading")));
        assert!(notices.iter().any(|n| n.contains("missing.csv")));
        assert!(notices.iter().any(|n| n.contains("standorte.csv")));
        assert_eq!(view.cards.len(), 1);
        Ok(())
    }
}
