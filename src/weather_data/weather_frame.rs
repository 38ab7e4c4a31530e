//! Contains the `WeatherLazyFrame` structure for lazy operations on an hourly
//! weather table before it is turned into typed records.

use crate::types::time_window::TimeWindow;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::extractor::{extract_weather_series, WeatherSeries, COL_DT};
use polars::prelude::{col, lit, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding hourly weather rows.
///
/// Window filtering works on the epoch-second `dt` column, so predicates are
/// pushed down into the CSV scan. Sources that only carry `dt_iso` should be
/// loaded eagerly and filtered with [`crate::windowing::filter::filter_window`].
///
/// # Errors
///
/// Nothing is evaluated until [`WeatherLazyFrame::collect_series`]; errors in
/// the plan (such as a missing `dt` column) surface there.
#[derive(Clone)]
pub struct WeatherLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
    source_name: String,
}

impl WeatherLazyFrame {
    pub fn new(frame: LazyFrame, source_name: &str) -> Self {
        Self {
            frame,
            source_name: source_name.to_string(),
        }
    }

    /// Applies an arbitrary Polars predicate, returning a new frame.
    pub fn filter(&self, predicate: Expr) -> WeatherLazyFrame {
        WeatherLazyFrame::new(self.frame.clone().filter(predicate), &self.source_name)
    }

    /// Keeps rows with `window.start <= dt <= window.end`.
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// use swiss_mobility_weather::{TimeUnit, TimeWindow};
    /// use swiss_mobility_weather::weather_data::data_loader::scan_weather_csv;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let window = TimeWindow::from_timestamp(1_672_531_200, 3, TimeUnit::Days)?;
    /// let series = scan_weather_csv(Path::new("arbeit/wetter/zurich_23_clean.csv"))?
    ///     .get_window(&window)
    ///     .collect_series()?;
    /// println!("{} rows in window", series.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_window(&self, window: &TimeWindow) -> WeatherLazyFrame {
        self.filter(
            col(COL_DT)
                .gt_eq(lit(window.start_timestamp()))
                .and(col(COL_DT).lt_eq(lit(window.end_timestamp()))),
        )
    }

    /// Evaluates the plan and extracts typed records.
    ///
    /// An empty result is returned as an empty series rather than an error.
    pub fn collect_series(self) -> Result<WeatherSeries, WeatherDataError> {
        let df = self.frame.collect()?;
        if df.height() == 0 {
            return Ok(WeatherSeries {
                source: self.source_name,
                ..Default::default()
            });
        }
        extract_weather_series(&df, &self.source_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time_unit::TimeUnit;
    use polars::prelude::*;

    fn lazy_year_start() -> WeatherLazyFrame {
        let dt: Vec<i64> = (0..48).map(|i| 1_672_531_200 + i * 3600).collect();
        let temp: Vec<f64> = (0..48).map(|i| i as f64).collect();
        let df = df!(
            "dt" => dt,
            "temp" => temp,
            "humidity" => vec![70i64; 48],
            "wind_speed" => vec![3.0; 48],
            "weather_icon" => vec!["02d"; 48],
            "weather_description" => vec!["few clouds"; 48]
        )
        .unwrap();
        WeatherLazyFrame::new(df.lazy(), "memory")
    }

    #[test]
    fn window_pushdown_is_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let window = TimeWindow::from_timestamp(1_672_531_200 + 3600, 2, TimeUnit::Hours)?;
        let series = lazy_year_start().get_window(&window).collect_series()?;

        let temps: Vec<f64> = series.records.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn window_outside_data_collects_empty() -> Result<(), Box<dyn std::error::Error>> {
        let window = TimeWindow::from_timestamp(1_700_000_000, 1, TimeUnit::Days)?;
        let series = lazy_year_start().get_window(&window).collect_series()?;
        assert!(series.is_empty());
        assert_eq!(series.source, "memory");
        Ok(())
    }
}
