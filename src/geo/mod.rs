// Geospatial overlay: map centre and operational markers

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a marker represents, used by the map for icon choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Headquarters,
    ResourceHub,
    Other,
}

/// Labelled point on the operational map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_marker_kind")]
    pub kind: MarkerKind,
}

fn default_marker_kind() -> MarkerKind {
    MarkerKind::Other
}

/// Map view served to the geospatial panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_markers")]
    pub markers: Vec<Marker>,
}

// Kolkata
fn default_center() -> [f64; 2] {
    [22.5726, 88.3639]
}

fn default_zoom() -> u8 {
    11
}

fn default_markers() -> Vec<Marker> {
    vec![
        Marker {
            label: "HQ".to_string(),
            lat: 22.5726,
            lon: 88.3639,
            kind: MarkerKind::Headquarters,
        },
        Marker {
            label: "Resource Hub A".to_string(),
            lat: 22.58,
            lon: 88.40,
            kind: MarkerKind::ResourceHub,
        },
    ]
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            markers: default_markers(),
        }
    }
}

impl MapView {
    /// Check the centre and every marker are real coordinates
    pub fn validate(&self) -> Result<(), CoordinateError> {
        check_point("center", self.center[0], self.center[1])?;
        for marker in &self.markers {
            check_point(&marker.label, marker.lat, marker.lon)?;
        }
        Ok(())
    }
}

fn check_point(label: &str, lat: f64, lon: f64) -> Result<(), CoordinateError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(CoordinateError {
            label: label.to_string(),
            lat,
            lon,
        });
    }
    Ok(())
}

/// A point outside lat [-90, 90] / lon [-180, 180]
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateError {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' has invalid coordinates ({}, {})",
            self.label, self.lat, self.lon
        )
    }
}

impl std::error::Error for CoordinateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = MapView::default();
        assert_eq!(view.center, [22.5726, 88.3639]);
        assert_eq!(view.zoom, 11);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].kind, MarkerKind::Headquarters);
        assert!(view.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_marker_rejected() {
        let mut view = MapView::default();
        view.markers.push(Marker {
            label: "Nowhere".to_string(),
            lat: 95.0,
            lon: 0.0,
            kind: MarkerKind::Other,
        });

        let err = view.validate().unwrap_err();
        assert_eq!(err.label, "Nowhere");
    }

    #[test]
    fn test_marker_kind_defaults_to_other() {
        let marker: Marker =
            serde_json::from_str(r#"{"label": "Depot", "lat": 22.6, "lon": 88.3}"#).unwrap();
        assert_eq!(marker.kind, MarkerKind::Other);
    }
}
