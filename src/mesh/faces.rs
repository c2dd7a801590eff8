use crate::domain::Point3D;

/// One face of the mesh, borrowing its three vertices in face order
#[derive(Debug, Clone, Copy)]
pub struct Triangle<'a> {
    pub vertices: [&'a Point3D; 3],
}

/// Triangulated point set: shared vertices plus index triples
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    points: Vec<Point3D>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Build a mesh from vertices and faces indexing into them
    ///
    /// # Panics
    /// In debug builds, if a face references a vertex that does not exist.
    pub fn new(points: Vec<Point3D>, faces: Vec<[usize; 3]>) -> Self {
        debug_assert!(
            faces.iter().flatten().all(|&i| i < points.len()),
            "face index out of range"
        );
        Self { points, faces }
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Resolve a face into borrowed vertices
    pub fn triangle(&self, face: &[usize; 3]) -> Triangle<'_> {
        Triangle {
            vertices: [
                &self.points[face[0]],
                &self.points[face[1]],
                &self.points[face[2]],
            ],
        }
    }

    /// Iterate all faces as triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle<'_>> + '_ {
        self.faces.iter().map(|face| self.triangle(face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_borrows_vertices_in_order() {
        let mesh = Mesh::new(
            vec![
                Point3D::new(0.0, 0.0, 1.0),
                Point3D::new(1.0, 0.0, 2.0),
                Point3D::new(0.0, 1.0, 3.0),
            ],
            vec![[2, 0, 1]],
        );

        let tri = mesh.triangles().next().unwrap();
        assert_eq!(tri.vertices[0].z, 3.0);
        assert_eq!(tri.vertices[1].z, 1.0);
        assert_eq!(tri.vertices[2].z, 2.0);
        assert_eq!(mesh.triangle_count(), 1);
    }
}
