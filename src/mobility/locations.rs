use crate::geo::{projection, wkt};
use crate::mobility::columns::{optional_string, read_csv, required_string};
use crate::mobility::error::MobilityError;
use crate::types::city::LatLon;
use crate::types::rejected_row::{RejectedRow, RowError};
use crate::utils::first_present;
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use tokio::task;

pub const COL_GEOMETRY: &str = "geometry";
const SITE_COLUMNS: [&str; 2] = ["FK_STANDORT", "ID"];
const NAME_COLUMNS: [&str; 2] = ["BEZEICHNUNG", "NAME"];

/// A counting station with its LV95 position and the projected WGS84 point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterLocation {
    pub site_id: Option<String>,
    pub name: Option<String>,
    pub easting: f64,
    pub northing: f64,
    pub position: LatLon,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LocationSet {
    pub source: String,
    pub locations: Vec<CounterLocation>,
    pub rejected: Vec<RejectedRow>,
}

impl LocationSet {
    pub fn positions(&self) -> impl Iterator<Item = LatLon> + '_ {
        self.locations.iter().map(|l| l.position)
    }
}

fn locate(geometry: &str) -> Result<(f64, f64, LatLon), RowError> {
    let invalid = |_| RowError::InvalidGeometry(geometry.to_string());
    let (easting, northing) = wkt::parse_point(geometry).map_err(invalid)?;
    let position = projection::project(easting, northing).map_err(invalid)?;
    Ok((easting, northing, position))
}

/// Converts a counter-location `DataFrame` into [`CounterLocation`]s.
///
/// Only `geometry` is required. The identifier is read from `FK_STANDORT`
/// or `ID`, the label from `BEZEICHNUNG` or `NAME`, whichever exists first.
pub fn extract_locations(df: &DataFrame, source_name: &str) -> Result<LocationSet, MobilityError> {
    if df.height() == 0 {
        return Err(MobilityError::EmptySource(source_name.to_string()));
    }
    let geometry = required_string(df, source_name, COL_GEOMETRY)?;
    let sites = optional_string(df, source_name, first_present(df, &SITE_COLUMNS))?;
    let names = optional_string(df, source_name, first_present(df, &NAME_COLUMNS))?;
    let text = |ca: &Option<StringChunked>, row: usize| {
        ca.as_ref()
            .and_then(|ca| ca.get(row))
            .map(String::from)
    };

    let mut set = LocationSet {
        source: source_name.to_string(),
        ..Default::default()
    };
    for row in 0..df.height() {
        let located = geometry
            .get(row)
            .ok_or(RowError::MissingField(COL_GEOMETRY))
            .and_then(locate);
        match located {
            Ok((easting, northing, position)) => set.locations.push(CounterLocation {
                site_id: text(&sites, row),
                name: text(&names, row),
                easting,
                northing,
                position,
            }),
            Err(reason) => {
                warn!("Rejected row {} of {}: {}", row, source_name, reason);
                set.rejected.push(RejectedRow { row, reason });
            }
        }
    }
    Ok(set)
}

/// Loads the counter-location CSV (WKT points in the Swiss LV95 grid).
pub async fn load_locations(path: &Path) -> Result<LocationSet, MobilityError> {
    let path_buf = path.to_path_buf();
    let set = task::spawn_blocking(move || {
        let df = read_csv(&path_buf)?;
        extract_locations(&df, &path_buf.display().to_string())
    })
    .await??;
    info!(
        "Loaded {} counter locations from {}",
        set.locations.len(),
        path.display()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn projects_valid_points_and_rejects_broken_ones() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "ID" => [7i64, 8, 9],
            "NAME" => ["Bahnhofquai", "Limmatquai", "Seefeld"],
            "geometry" => [
                Some("POINT (2683009.89 1247937.2)"),
                Some("POLYGON ((0 0, 1 1))"),
                None,
            ]
        )?;
        let set = extract_locations(&df, "memory")?;

        assert_eq!(set.locations.len(), 1);
        let location = &set.locations[0];
        assert_eq!(location.site_id.as_deref(), Some("7"));
        assert_eq!(location.name.as_deref(), Some("Bahnhofquai"));
        assert!((location.position.lat() - 47.37).abs() < 0.05);
        assert!((location.position.lon() - 8.54).abs() < 0.05);

        assert_eq!(set.rejected.len(), 2);
        assert!(matches!(set.rejected[0].reason, RowError::InvalidGeometry(_)));
        assert_eq!(set.rejected[1].reason, RowError::MissingField(COL_GEOMETRY));
        Ok(())
    }

    #[test]
    fn identifier_and_name_are_optional() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("geometry" => ["POINT (2600000 1200000)"])?;
        let set = extract_locations(&df, "memory")?;
        assert_eq!(set.locations[0].site_id, None);
        assert_eq!(set.locations[0].name, None);
        Ok(())
    }

    #[tokio::test]
    async fn loads_locations_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"FK_STANDORT,BEZEICHNUNG,geometry\n\
              2990,Mythenquai,POINT (2682800 1245900)\n",
        )?;

        let set = load_locations(file.path()).await?;
        assert_eq!(set.locations.len(), 1);
        assert_eq!(set.positions().count(), 1);
        assert_eq!(set.locations[0].easting, 2_682_800.0);
        Ok(())
    }

    #[tokio::test]
    async fn missing_geometry_column_fails() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"ID,NAME\n1,a\n")?;
        let result = load_locations(file.path()).await;
        assert!(matches!(result, Err(MobilityError::MissingColumn { .. })));
        Ok(())
    }
}
