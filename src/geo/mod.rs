//! Swiss grid coordinates: WKT parsing and reprojection to WGS84.

pub mod error;
pub mod projection;
pub mod wkt;

use crate::types::city::LatLon;
use error::GeoError;

/// Parses a WKT `POINT` in LV95 and projects it to WGS84.
pub fn project_wkt_point(text: &str) -> Result<LatLon, GeoError> {
    let (easting, northing) = wkt::parse_point(text)?;
    projection::project(easting, northing)
}
