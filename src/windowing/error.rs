use crate::types::time_unit::TimeUnit;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Start timestamp {0} is outside the representable date range")]
    InvalidTimestamp(i64),

    #[error("Window starting at {start} with duration {duration} {unit} ends outside the representable date range")]
    EndOutOfRange {
        start: DateTime<Utc>,
        duration: u32,
        unit: TimeUnit,
    },
}
