use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("Coordinate ({easting}, {northing}) is not a finite number")]
    NonFiniteCoordinate { easting: f64, northing: f64 },

    #[error("Malformed WKT point '{0}'")]
    MalformedPoint(String),
}
