//! Defines the granularity a [`crate::TimeWindow`] is expressed in.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The unit a window duration is counted in.
///
/// The unit also decides how the sampler reduces the filtered rows:
/// `Hours` samples raw hourly rows, `Days` and `Months` first aggregate
/// per calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeUnit {
    Hours,
    Days,
    Months,
}

impl TimeUnit {
    /// Largest duration a user can pick for this unit.
    pub fn max_duration(&self) -> u32 {
        match self {
            TimeUnit::Hours => 24,
            TimeUnit::Days | TimeUnit::Months => 31,
        }
    }

    /// Duration preselected when the unit changes.
    pub fn default_duration(&self) -> u32 {
        match self {
            TimeUnit::Hours => 12,
            TimeUnit::Days | TimeUnit::Months => 10,
        }
    }

    /// `true` when rows are aggregated per calendar date before sampling.
    pub fn aggregates_daily(&self) -> bool {
        !matches!(self, TimeUnit::Hours)
    }

    fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "Hours",
            TimeUnit::Days => "Days",
            TimeUnit::Months => "Months",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown time unit '{0}', expected Hours, Days or Months")]
pub struct ParseTimeUnitError(pub String);

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(TimeUnit::Hours),
            "days" | "day" | "d" => Ok(TimeUnit::Days),
            "months" | "month" | "m" => Ok(TimeUnit::Months),
            _ => Err(ParseTimeUnitError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Hours".parse::<TimeUnit>(), Ok(TimeUnit::Hours));
        assert_eq!("days".parse::<TimeUnit>(), Ok(TimeUnit::Days));
        assert_eq!(" MONTHS ".parse::<TimeUnit>(), Ok(TimeUnit::Months));
        assert!("weeks".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn slider_bounds_follow_unit() {
        assert_eq!(TimeUnit::Hours.max_duration(), 24);
        assert_eq!(TimeUnit::Days.max_duration(), 31);
        assert_eq!(TimeUnit::Hours.default_duration(), 12);
        assert_eq!(TimeUnit::Months.default_duration(), 10);
        assert_eq!(TimeUnit::Days.to_string(), "Days");
    }
}
