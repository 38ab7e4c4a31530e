use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swiss_mobility_weather::windowing::representative;
use swiss_mobility_weather::{TimeUnit, TimeWindow, WeatherRecord};

const JAN_1_2023: i64 = 1_672_531_200;

fn year_of_hours() -> Vec<WeatherRecord> {
    (0..8760i64)
        .filter_map(|h| {
            Some(WeatherRecord {
                timestamp: DateTime::from_timestamp(JAN_1_2023 + h * 3600, 0)?,
                temperature: (h % 24) as f64,
                humidity: 70.0,
                wind_speed: (h % 7) as f64,
                precipitation: if h % 11 == 0 { 0.4 } else { 0.0 },
                icon: if h % 3 == 0 { "10d" } else { "04d" }.to_string(),
                description: "broken clouds".to_string(),
            })
        })
        .collect()
}

fn bench_sampling(c: &mut Criterion) {
    let records = year_of_hours();
    let windows = [
        ("hours_24", TimeWindow::from_timestamp(JAN_1_2023, 24, TimeUnit::Hours)),
        ("days_31", TimeWindow::from_timestamp(JAN_1_2023, 31, TimeUnit::Days)),
        ("months_12", TimeWindow::from_timestamp(JAN_1_2023, 12, TimeUnit::Months)),
    ];
    for (name, window) in windows {
        let Ok(window) = window else { continue };
        c.bench_function(name, |b| {
            b.iter(|| representative(black_box(&records), black_box(&window)))
        });
    }
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
