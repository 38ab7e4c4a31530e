use crate::types::time_unit::TimeUnit;
use crate::types::time_window::TimeWindow;
use crate::types::weather_record::WeatherRecord;
use crate::windowing::error::WindowError;
use log::debug;

/// Returns the records whose timestamp lies in `window`, bounds included.
///
/// Input order is preserved. An empty result is a valid outcome.
pub fn filter_window(records: &[WeatherRecord], window: &TimeWindow) -> Vec<WeatherRecord> {
    debug!(
        "Filtering {} records to [{}, {}]",
        records.len(),
        window.start,
        window.end
    );
    records
        .iter()
        .filter(|record| window.contains(record.timestamp))
        .cloned()
        .collect()
}

/// Derives the window from `start_timestamp` (epoch seconds), `duration` and
/// `unit`, then filters `records` to it.
///
/// # Errors
///
/// Only window construction can fail (see [`TimeWindow::from_timestamp`]);
/// an empty result is returned as `Ok(vec![])`.
pub fn filter(
    records: &[WeatherRecord],
    start_timestamp: i64,
    duration: u32,
    unit: TimeUnit,
) -> Result<Vec<WeatherRecord>, WindowError> {
    let window = TimeWindow::from_timestamp(start_timestamp, duration, unit)?;
    Ok(filter_window(records, &window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windowing::test_support::hourly_records;
    use chrono::{TimeZone, Utc};

    const JAN_1_2023: i64 = 1_672_531_200;

    #[test]
    fn includes_both_bounds() {
        let records = hourly_records(JAN_1_2023, 10, |_| 1.0);
        let filtered = filter(&records, JAN_1_2023 + 3600, 3, TimeUnit::Hours).unwrap();

        let stamps: Vec<i64> = filtered.iter().map(|r| r.timestamp.timestamp()).collect();
        assert_eq!(
            stamps,
            vec![JAN_1_2023 + 3600, JAN_1_2023 + 7200, JAN_1_2023 + 10_800, JAN_1_2023 + 14_400]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let filtered = filter(&[], JAN_1_2023, 5, TimeUnit::Days).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn window_without_rows_is_not_an_error() {
        let records = hourly_records(JAN_1_2023, 24, |_| 1.0);
        let filtered = filter(&records, JAN_1_2023 + 90 * 86_400, 2, TimeUnit::Days).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn month_window_follows_calendar() {
        // 1 Jan .. 1 Feb inclusive: 31 days of hours plus the closing midnight.
        let records = hourly_records(JAN_1_2023, 24 * 40, |_| 1.0);
        let filtered = filter(&records, JAN_1_2023, 1, TimeUnit::Months).unwrap();
        assert_eq!(filtered.len(), 31 * 24 + 1);
        assert_eq!(
            filtered.last().map(|r| r.timestamp),
            Some(Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap())
        );
    }
}
