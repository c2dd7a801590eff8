use serde_json::Value;
use tracing::{debug, warn};

use super::InputDocument;
use crate::config::ContourConfig;
use crate::domain::Point3D;
use crate::error::{ContourError, Result};

/// Longitude (truncated) that marks data running up to the antimeridian
const WRAP_EAST: f64 = 359.0;
/// Longitude (truncated) of points duplicated across the wrap
const WRAP_WEST: f64 = 0.0;

/// Cleans raw `[lon, lat, value]` positions before triangulation
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    min_latitude: f64,
    max_latitude: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&ContourConfig::default())
    }
}

impl Normalizer {
    pub fn new(min_latitude: f64, max_latitude: f64) -> Self {
        Self {
            min_latitude,
            max_latitude,
        }
    }

    pub fn from_config(config: &ContourConfig) -> Self {
        Self::new(config.min_latitude, config.max_latitude)
    }

    /// Drop polar points and close the 0/360 longitude seam
    ///
    /// Points with latitude outside the open `(min, max)` band are removed.
    /// When any remaining point sits at longitude 359.x, every point at
    /// longitude 0.x is repeated at +360 so the mesh spans the wrap.
    pub fn normalize(&self, positions: &[(f64, f64, f64)]) -> Vec<Point3D> {
        let mut points: Vec<Point3D> = positions
            .iter()
            .filter(|(_, lat, _)| *lat > self.min_latitude && *lat < self.max_latitude)
            .map(|&p| Point3D::from(p))
            .collect();

        let dropped = positions.len() - points.len();
        if dropped > 0 {
            warn!(dropped, "points outside the latitude band were dropped");
        }

        let wraps = points.iter().any(|p| p.x.trunc() == WRAP_EAST);
        if wraps {
            let duplicates: Vec<Point3D> = points
                .iter()
                .filter(|p| p.x.trunc() == WRAP_WEST)
                .map(|p| p.shifted_x(360.0))
                .collect();
            debug!(duplicates = duplicates.len(), "points repeated across the antimeridian");
            points.extend(duplicates);
        }

        points
    }
}

/// Normalize with the default latitude band
pub fn normalize_points(positions: &[(f64, f64, f64)]) -> Vec<Point3D> {
    Normalizer::default().normalize(positions)
}

/// Read `[lon, lat, value]` positions from a MultiPoint GeoJSON document
///
/// Accepts a Feature with a MultiPoint geometry or a bare MultiPoint.
///
/// # Errors
/// * `EmptyInput` - the document is `null`, has no `type`, or has no geometry
/// * `UnsupportedGeometry` - the geometry is anything but a MultiPoint
/// * `MalformedCoordinate` - a position has fewer than three numbers
pub fn read_positions(json: &str) -> Result<Vec<(f64, f64, f64)>> {
    let document: Option<InputDocument> = serde_json::from_str(json)?;
    let document = document.ok_or(ContourError::EmptyInput)?;
    let kind = document.type_.ok_or(ContourError::EmptyInput)?;

    let (geometry_kind, coordinates) = match kind.as_str() {
        "Feature" => {
            let geometry = document.geometry.ok_or(ContourError::EmptyInput)?;
            let geometry_kind = geometry.type_.ok_or(ContourError::EmptyInput)?;
            (geometry_kind, geometry.coordinates)
        }
        _ => (kind, document.coordinates),
    };

    if geometry_kind != "MultiPoint" {
        return Err(ContourError::UnsupportedGeometry {
            found: geometry_kind,
        });
    }

    let raw: Vec<Vec<f64>> = match coordinates {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value(value)?,
    };

    raw.iter()
        .enumerate()
        .map(|(index, p)| match p.as_slice() {
            [lon, lat, value, ..] => Ok((*lon, *lat, *value)),
            _ => Err(ContourError::MalformedCoordinate {
                index,
                len: p.len(),
            }),
        })
        .collect()
}

/// Parse and normalize a MultiPoint GeoJSON document in one step
pub fn parse_points(json: &str, normalizer: &Normalizer) -> Result<Vec<Point3D>> {
    let positions = read_positions(json)?;
    let points = normalizer.normalize(&positions);
    debug!(read = positions.len(), kept = points.len(), "input points normalized");
    Ok(points)
}
