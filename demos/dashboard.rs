//! Renders the dashboard once for a selection given on the command line.
//!
//! cargo run --example dashboard -- zurich 2023-03-01 Days 7

use chrono::{Datelike, NaiveDate};
use std::env;
use swiss_mobility_weather::session::context::Session;
use swiss_mobility_weather::session::dashboard::Dashboard;
use swiss_mobility_weather::session::selection::{DisplayToggles, Selection};
use swiss_mobility_weather::{CitySelection, Settings, TimeUnit};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cities: CitySelection = args.first().map_or("zurich", String::as_str).parse()?;
    let date = NaiveDate::parse_from_str(
        args.get(1).map_or("2023-01-01", String::as_str),
        "%Y-%m-%d",
    )?;
    let unit: TimeUnit = args.get(2).map_or("Hours", String::as_str).parse()?;
    let duration = args.get(3).map(|d| d.parse::<u32>()).transpose()?;

    let selection = Selection::builder()
        .cities(cities)
        .start(Selection::start_from_parts(date.year(), date.month(), date.day(), 1)?)
        .unit(unit)
        .maybe_duration(duration)
        .toggles(
            DisplayToggles::builder()
                .show_summary(true)
                .show_rain(true)
                .show_temperature(true)
                .show_wind(true)
                .build(),
        )
        .build();

    let dashboard = Dashboard::load(&Settings::from_env()).await;
    let mut session = Session::start("cli", selection);
    let view = dashboard.render(&mut session);

    for notice in &view.notices {
        println!("! {}", notice);
    }
    for card in &view.cards {
        println!(
            "{:>8}  {:<24} {:>6.1}°C  rain {:>5.1}%  wind {:>5.1}% {}",
            card.label,
            card.emoji.unwrap_or(""),
            card.temperature.as_ref().map_or(f64::NAN, |t| t.value),
            card.rain.as_ref().map_or(0.0, |r| r.width),
            card.wind.as_ref().map_or(0.0, |w| w.width),
            "~".repeat(card.wind.as_ref().map_or(0, |w| w.intensity)),
        );
    }
    if let Some(map) = &view.map {
        println!(
            "map centre ({:.4}, {:.4}) zoom {} with {} markers",
            map.center.lat(),
            map.center.lon(),
            map.zoom,
            map.markers.len()
        );
    }
    session.end();
    Ok(())
}
