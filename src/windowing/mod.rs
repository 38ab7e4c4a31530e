//! Weather windowing and aggregation: restricts an hourly series to a
//! [`crate::TimeWindow`] and reduces it to a bounded number of
//! representative rows for display.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod sampler;

#[cfg(test)]
pub(crate) mod test_support;

use crate::types::time_window::TimeWindow;
use crate::types::weather_record::WeatherRecord;

/// Filter followed by sampling, the way every view consumes a series.
pub fn representative(records: &[WeatherRecord], window: &TimeWindow) -> Vec<WeatherRecord> {
    let filtered = filter::filter_window(records, window);
    sampler::sample(&filtered, window.duration, window.unit)
}
