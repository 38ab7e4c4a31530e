use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{year:04}-{month:02}-{day:02} {hour:02}:00 is not a valid date and hour")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },
}
