use tracing::debug;

use super::Mesh;
use crate::domain::Point3D;
use crate::error::{ContourError, Result};

/// Builds a planar triangulation over the (x, y) positions of a point set
pub trait Triangulator: Send + Sync {
    fn triangulate(&self, points: Vec<Point3D>) -> Result<Mesh>;
}

/// Delaunay triangulation of the input positions
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(&self, points: Vec<Point3D>) -> Result<Mesh> {
        if points.len() < 3 {
            return Err(ContourError::Unclassified(format!(
                "triangulation needs at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ContourError::Unclassified(format!(
                "point {} has a non-finite position",
                i
            )));
        }

        let vertices: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();

        let triangulation = delaunator::triangulate(&vertices);

        let faces: Vec<[usize; 3]> = triangulation
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        debug!(points = points.len(), triangles = faces.len(), "triangulated");
        Ok(Mesh::new(points, faces))
    }
}
