use geo::{Coord, LineString, coord};

use super::simplify::{DouglasPeucker, Simplifier};

/// Default Douglas-Peucker tolerance applied between the two smoothing passes
pub const SMOOTH_TOLERANCE: f64 = 0.3;

/// One round of Chaikin corner cutting
///
/// Every pair of neighbouring coordinates is replaced by the points one
/// quarter and three quarters of the way along it. The first and last
/// coordinates are kept, so an `n`-coordinate line becomes `2(n-1) + 2`.
pub fn chaikin_pass(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
        return Vec::new();
    };

    let mut smoothed = Vec::with_capacity(coords.len() * 2);
    smoothed.push(first);
    for pair in coords.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        smoothed.push(coord! {
            x: 0.75 * p1.x + 0.25 * p2.x,
            y: 0.75 * p1.y + 0.25 * p2.y,
        });
        smoothed.push(coord! {
            x: 0.25 * p1.x + 0.75 * p2.x,
            y: 0.25 * p1.y + 0.75 * p2.y,
        });
    }
    smoothed.push(last);
    smoothed
}

/// Corner cut, simplify, corner cut again
#[derive(Debug, Clone, Copy)]
pub struct CurveSmoother {
    tolerance: f64,
}

impl Default for CurveSmoother {
    fn default() -> Self {
        Self::new(SMOOTH_TOLERANCE)
    }
}

impl CurveSmoother {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn smooth(&self, line: &LineString<f64>) -> LineString<f64> {
        let cut = LineString::new(chaikin_pass(&line.0));
        let simplified = DouglasPeucker.simplify(&cut, self.tolerance);
        LineString::new(chaikin_pass(&simplified.0))
    }
}
