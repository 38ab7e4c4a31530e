use crate::session::selection::Selection;
use crate::types::city::LatLon;
use log::info;
use serde::Serialize;

/// Colour of the counting-station markers.
pub const MARKER_COLOR: &str = "rgba(49, 134, 204, 1)";

/// A point drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLon,
    pub color: String,
}

impl Marker {
    pub fn at(position: LatLon) -> Self {
        Self {
            position,
            color: MARKER_COLOR.to_string(),
        }
    }
}

/// State belonging to one user of the dashboard.
///
/// A session owns its selection and the markers computed for it; two
/// sessions never share either. Create one with [`Session::start`] and
/// drop it with [`Session::end`].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: String,
    selection: Selection,
    markers: Vec<Marker>,
}

impl Session {
    pub fn start(id: impl Into<String>, selection: Selection) -> Self {
        let id = id.into();
        info!("Session {} started", id);
        Self {
            id,
            selection,
            markers: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the selection, e.g. after a control changed.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub(crate) fn replace_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn end(self) {
        info!("Session {} ended", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::city::City;
    use chrono::DateTime;

    fn selection() -> Selection {
        Selection::builder()
            .start(DateTime::from_timestamp(1_672_534_800, 0).unwrap())
            .build()
    }

    #[test]
    fn sessions_keep_separate_state() {
        let mut first = Session::start("a", selection());
        let second = Session::start("b", selection());

        first.replace_markers(vec![Marker::at(City::Bern.center())]);
        assert_eq!(first.markers().len(), 1);
        assert!(second.markers().is_empty());
        assert_eq!(first.markers()[0].color, MARKER_COLOR);

        first.end();
        second.end();
    }
}
