//! Marching-triangles classification
//!
//! Each triangle vertex contributes one bit to a 3-bit mask:
//!
//! ```text
//!   P0 -> 1    P1 -> 2    P2 -> 4
//!
//!   P0 ---- P1
//!    |     /
//!    |   /
//!    | /
//!   P2
//! ```
//!
//! Masks 0 and 7 put every vertex on the same side of the threshold and
//! produce nothing. Every other mask separates exactly one vertex from the
//! other two, so the contour cuts the two edges meeting at that vertex.

use crate::domain::Point3D;

/// Which side of the threshold each vertex of a triangle falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseCode(u8);

impl CaseCode {
    pub const EMPTY: CaseCode = CaseCode(0);
    pub const ALL: CaseCode = CaseCode(7);

    /// Build a case code from a raw mask, keeping the low three bits
    pub fn from_mask(mask: u8) -> Self {
        CaseCode(mask & 7)
    }

    pub fn mask(self) -> u8 {
        self.0
    }

    /// The same split seen from the other side of the threshold
    pub fn complement(self) -> Self {
        CaseCode(self.0 ^ 7)
    }

    /// True when the threshold passes through the triangle
    pub fn is_crossing(self) -> bool {
        self != Self::EMPTY && self != Self::ALL
    }

    /// Vertex index pairs of the two edges cut by the contour, in the order
    /// their endpoints are handed to the interpolator.
    pub fn cut_edges(self) -> Option<[(usize, usize); 2]> {
        match self.0 {
            1 | 6 => Some([(0, 1), (0, 2)]),
            2 | 5 => Some([(0, 1), (1, 2)]),
            4 | 3 => Some([(2, 1), (2, 0)]),
            _ => None,
        }
    }

    /// Index of the vertex on its own side of the threshold
    pub fn lone_vertex(self) -> Option<usize> {
        match self.0 {
            1 | 6 => Some(0),
            2 | 5 => Some(1),
            4 | 3 => Some(2),
            _ => None,
        }
    }
}

/// Classify a triangle's vertices against `threshold`
///
/// A zero threshold marks vertices whose value is exactly zero; any other
/// threshold marks vertices strictly below it.
pub fn classify(vertices: [&Point3D; 3], threshold: f64) -> CaseCode {
    let mut mask = 0u8;
    for (i, p) in vertices.iter().enumerate() {
        let below = if threshold == 0.0 {
            p.z == 0.0
        } else {
            p.z < threshold
        };
        if below {
            mask |= 1 << i;
        }
    }

    CaseCode(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(z: [f64; 3]) -> [Point3D; 3] {
        [
            Point3D::new(0.0, 0.0, z[0]),
            Point3D::new(1.0, 0.0, z[1]),
            Point3D::new(0.0, 1.0, z[2]),
        ]
    }

    fn classify_values(z: [f64; 3], threshold: f64) -> CaseCode {
        let t = tri(z);
        classify([&t[0], &t[1], &t[2]], threshold)
    }

    #[test]
    fn test_bits_per_vertex() {
        assert_eq!(classify_values([1.0, 9.0, 9.0], 5.0).mask(), 1);
        assert_eq!(classify_values([9.0, 1.0, 9.0], 5.0).mask(), 2);
        assert_eq!(classify_values([9.0, 9.0, 1.0], 5.0).mask(), 4);
        assert_eq!(classify_values([1.0, 1.0, 9.0], 5.0).mask(), 3);
        assert_eq!(classify_values([1.0, 9.0, 1.0], 5.0).mask(), 5);
        assert_eq!(classify_values([9.0, 1.0, 1.0], 5.0).mask(), 6);
    }

    #[test]
    fn test_same_side_is_not_crossing() {
        let above = classify_values([6.0, 7.0, 8.0], 5.0);
        let below = classify_values([1.0, 2.0, 3.0], 5.0);
        assert_eq!(above, CaseCode::EMPTY);
        assert_eq!(below, CaseCode::ALL);
        assert!(!above.is_crossing());
        assert!(!below.is_crossing());
        assert!(above.cut_edges().is_none());
    }

    #[test]
    fn test_equal_to_threshold_is_not_below() {
        assert_eq!(classify_values([5.0, 5.0, 5.0], 5.0), CaseCode::EMPTY);
        assert_eq!(classify_values([4.999, 5.0, 5.0], 5.0).mask(), 1);
    }

    #[test]
    fn test_zero_threshold_uses_equality() {
        // Negative values are not "below" a zero threshold, only exact zeros count
        assert_eq!(classify_values([-3.0, 0.0, 4.0], 0.0).mask(), 2);
        assert_eq!(classify_values([-3.0, -1.0, -2.0], 0.0), CaseCode::EMPTY);
        assert_eq!(classify_values([0.0, 0.0, 0.0], 0.0), CaseCode::ALL);
    }

    #[test]
    fn test_complements_cut_same_edges() {
        for mask in 1..7u8 {
            let code = CaseCode::from_mask(mask);
            assert!(code.is_crossing());
            assert_eq!(code.cut_edges(), code.complement().cut_edges());
            assert_eq!(code.lone_vertex(), code.complement().lone_vertex());
        }
    }

    #[test]
    fn test_cut_edges_touch_lone_vertex() {
        for mask in 1..7u8 {
            let code = CaseCode::from_mask(mask);
            let lone = code.lone_vertex().unwrap();
            for (a, b) in code.cut_edges().unwrap() {
                assert!(a == lone || b == lone, "mask {mask} cuts an edge away from {lone}");
            }
        }
    }
}
