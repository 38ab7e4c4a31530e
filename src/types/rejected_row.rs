use serde::Serialize;
use thiserror::Error;

/// Why a single row was left out of a loaded table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("missing value for '{0}'")]
    MissingField(&'static str),

    #[error("unparseable timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("unusable geometry '{0}'")]
    InvalidGeometry(String),
}

/// A row that was dropped while loading, with its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RowError,
}

fn serialize_reason<S: serde::Serializer>(reason: &RowError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&reason.to_string())
}
