//! Conversion from the Swiss national grid LV95 (EPSG:2056) to WGS84
//! (EPSG:4326) using the approximate formulas published by swisstopo.
//!
//! Accuracy is about one metre inside Switzerland, which is plenty for
//! placing counter markers on a map.

use crate::geo::error::GeoError;
use crate::types::city::LatLon;

const FALSE_EASTING: f64 = 2_600_000.0;
const FALSE_NORTHING: f64 = 1_200_000.0;

/// Projects an LV95 `(easting, northing)` pair in metres to latitude and
/// longitude in degrees.
///
/// ```
/// use swiss_mobility_weather::geo::projection::project;
///
/// // Old observatory in Bern, the origin of the grid.
/// let origin = project(2_600_000.0, 1_200_000.0).unwrap();
/// assert!((origin.lat() - 46.95108).abs() < 1e-4);
/// assert!((origin.lon() - 7.43863).abs() < 1e-4);
/// ```
///
/// # Errors
///
/// Returns [`GeoError::NonFiniteCoordinate`] for NaN or infinite input.
pub fn project(easting: f64, northing: f64) -> Result<LatLon, GeoError> {
    if !easting.is_finite() || !northing.is_finite() {
        return Err(GeoError::NonFiniteCoordinate { easting, northing });
    }

    // Auxiliary values in units of 1000 km relative to the projection centre.
    let y = (easting - FALSE_EASTING) / 1_000_000.0;
    let x = (northing - FALSE_NORTHING) / 1_000_000.0;

    // Results in units of 10000".
    let lon = 2.677_909_4 + 4.728_982 * y + 0.791_484 * y * x + 0.130_6 * y * x * x
        - 0.043_6 * y * y * y;
    let lat = 16.902_389_2 + 3.238_272 * x
        - 0.270_978 * y * y
        - 0.002_528 * x * x
        - 0.044_7 * y * y * x
        - 0.014_0 * x * x * x;

    Ok(LatLon(lat * 100.0 / 36.0, lon * 100.0 / 36.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zurich_counter_lands_in_zurich() {
        // Bahnhofquai area.
        let position = project(2_683_300.0, 1_248_100.0).unwrap();
        assert!((position.lat() - 47.377).abs() < 0.01, "lat {}", position.lat());
        assert!((position.lon() - 8.541).abs() < 0.01, "lon {}", position.lon());
    }

    #[test]
    fn swisstopo_reference_point() {
        // Reference values from the swisstopo approximation note.
        let position = project(2_700_000.0, 1_100_000.0).unwrap();
        assert!((position.lat() - 46.044_130).abs() < 1e-4, "lat {}", position.lat());
        assert!((position.lon() - 8.730_497).abs() < 1e-4, "lon {}", position.lon());
    }

    #[test]
    fn rejects_non_finite_input() {
        assert!(matches!(
            project(f64::NAN, 1_200_000.0),
            Err(GeoError::NonFiniteCoordinate { .. })
        ));
        assert!(project(2_600_000.0, f64::INFINITY).is_err());
    }
}
