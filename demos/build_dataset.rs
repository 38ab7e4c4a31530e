//! Downloads the Zurich counts, joins them with hourly weather and writes
//! the combined table. Weather comes from OpenWeather when
//! `OPENWEATHER_API_KEY` is set, otherwise from the local Zurich CSV.

use chrono::NaiveDate;
use std::collections::HashMap;
use swiss_mobility_weather::fetch::historical::HistoricalWeatherClient;
use swiss_mobility_weather::fetch::open_data::{OpenDataClient, ZURICH_COUNTS_2023_URL};
use swiss_mobility_weather::mobility::analysis::{
    correlation_matrix, daily_means, site_counts, temperature_bicycle_correlation,
};
use swiss_mobility_weather::mobility::counts::extract_counts;
use swiss_mobility_weather::mobility::join::{join_hourly, write_joined_csv, JoinOptions};
use swiss_mobility_weather::weather_data::clean::{check_coverage, deduplicate_hours};
use swiss_mobility_weather::weather_data::data_loader::load_weather_csv;
use swiss_mobility_weather::{City, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();

    let open_data = OpenDataClient::new(&settings.cache_dir, settings.request_delay);
    let mut counts = Vec::new();
    for (url, frame) in open_data.fetch_all(&[ZURICH_COUNTS_2023_URL]).await {
        let series = extract_counts(&frame.collect()?, &url, City::Zurich)?;
        println!("{}: {} counts, {} rejected", url, series.counts.len(), series.rejected.len());
        counts.extend(series.counts);
    }

    let weather = match HistoricalWeatherClient::from_settings(&settings) {
        Ok(client) => {
            let start = NaiveDate::from_ymd_opt(2023, 1, 1).ok_or("bad start date")?;
            let end = NaiveDate::from_ymd_opt(2023, 1, 31).ok_or("bad end date")?;
            client.fetch_range(City::Zurich, start, end).await
        }
        Err(e) => {
            println!("{}; using {}", e, settings.zurich_weather_path.display());
            load_weather_csv(&settings.zurich_weather_path).await?.records
        }
    };
    let dedup = deduplicate_hours(&weather);
    let coverage = check_coverage(&dedup.records, 2023);
    println!(
        "weather: {} hours, {} duplicates, {}/{} hours of 2023",
        dedup.records.len(),
        dedup.duplicates.len(),
        coverage.present,
        coverage.expected
    );

    let weather_by_city = HashMap::from([(City::Zurich, dedup.records)]);
    let options = JoinOptions::builder().fill_missing(true).build();
    let rows = join_hourly(&counts, &weather_by_city, &options);
    write_joined_csv(&rows, &settings.output_path).await?;
    println!("wrote {} rows to {}", rows.len(), settings.output_path.display());

    for day in daily_means(&rows).iter().take(7) {
        println!(
            "{}  temp {:>6.1}  bicycles in {:>7.1}",
            day.date,
            day.temperature.unwrap_or(f64::NAN),
            day.bicycle_in.unwrap_or(f64::NAN)
        );
    }
    match temperature_bicycle_correlation(&rows) {
        Some(r) => println!("temperature vs. bicycles: r = {:.3}", r),
        None => println!("temperature vs. bicycles: not enough data"),
    }
    for (site, n) in site_counts(&rows).iter().take(5) {
        println!("site {:>6}: {} rows", site, n);
    }
    for cell in correlation_matrix(&rows) {
        if let Some(r) = cell.r {
            println!(
                "{:>10} vs {:<10} r = {:>6.3} ({} pairs)",
                cell.left, cell.right, r, cell.pairs
            );
        }
    }
    Ok(())
}
