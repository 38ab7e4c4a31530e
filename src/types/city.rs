//! Cities covered by the data set and the selection a user can make over them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A geographical coordinate using latitude and longitude (WGS84 degrees).
///
/// Latitude is the first element, longitude the second.
///
/// ```
/// use swiss_mobility_weather::LatLon;
///
/// let bern = LatLon(46.9480, 7.4474);
/// assert_eq!(bern.0, 46.9480);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }

    /// Arithmetic midpoint, good enough to centre a map on two nearby cities.
    pub fn midpoint(&self, other: &LatLon) -> LatLon {
        LatLon((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Bern,
    Zurich,
}

impl City {
    pub const ALL: [City; 2] = [City::Bern, City::Zurich];

    pub fn name(&self) -> &'static str {
        match self {
            City::Bern => "Bern",
            City::Zurich => "Zurich",
        }
    }

    pub fn center(&self) -> LatLon {
        match self {
            City::Bern => LatLon(46.9480, 7.4474),
            City::Zurich => LatLon(47.3769, 8.5417),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which city (or both) the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CitySelection {
    Single(City),
    Both,
}

impl CitySelection {
    pub fn cities(&self) -> Vec<City> {
        match self {
            CitySelection::Single(city) => vec![*city],
            CitySelection::Both => City::ALL.to_vec(),
        }
    }

    pub fn includes(&self, city: City) -> bool {
        match self {
            CitySelection::Single(selected) => *selected == city,
            CitySelection::Both => true,
        }
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitySelection::Single(city) => write!(f, "{}", city),
            CitySelection::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown city '{0}', expected Bern, Zurich or both")]
pub struct ParseCityError(pub String);

impl FromStr for City {
    type Err = ParseCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bern" => Ok(City::Bern),
            "zurich" | "zürich" | "zuerich" => Ok(City::Zurich),
            _ => Err(ParseCityError(s.to_string())),
        }
    }
}

impl FromStr for CitySelection {
    type Err = ParseCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(CitySelection::Both);
        }
        s.parse::<City>().map(CitySelection::Single)
    }
}
