use crate::types::time_unit::TimeUnit;
use crate::types::weather_record::WeatherRecord;
use crate::windowing::aggregate::aggregate_daily;

/// `count` evenly spaced indices over `0..len`, first and last included.
///
/// Positions are `round(i * (len - 1) / (count - 1))`. When `len <= count`
/// every index is returned once, so the result never repeats an index.
pub fn even_indices(len: usize, count: usize) -> Vec<usize> {
    if count == 0 || len == 0 {
        return Vec::new();
    }
    if len <= count {
        return (0..len).collect();
    }
    if count == 1 {
        return vec![0];
    }
    let step = (len - 1) as f64 / (count - 1) as f64;
    (0..count)
        .map(|i| ((i as f64) * step).round() as usize)
        .collect()
}

/// Keeps at most `count` evenly spaced rows; shorter input is returned as is.
pub fn downsample<T: Clone>(rows: &[T], count: usize) -> Vec<T> {
    if rows.len() <= count {
        return rows.to_vec();
    }
    even_indices(rows.len(), count)
        .into_iter()
        .map(|index| rows[index].clone())
        .collect()
}

/// Reduces window-filtered records to at most `duration` representative rows.
///
/// * `Hours`: the hourly rows are down-sampled directly.
/// * `Days` / `Months`: rows are first aggregated per calendar date (see
///   [`aggregate_daily`]) and the per-date rows are down-sampled.
///
/// Rows keep their chronological order and nothing is interpolated.
pub fn sample(filtered: &[WeatherRecord], duration: u32, unit: TimeUnit) -> Vec<WeatherRecord> {
    if filtered.is_empty() {
        return Vec::new();
    }
    let count = duration as usize;
    if unit.aggregates_daily() {
        downsample(&aggregate_daily(filtered), count)
    } else {
        downsample(filtered, count)
    }
}
