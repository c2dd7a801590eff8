use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, LineString, Simplify};

/// Reduces the number of coordinates of a line within a distance tolerance
pub trait Simplifier: Send + Sync {
    fn simplify(&self, line: &LineString<f64>, tolerance: f64) -> LineString<f64>;
}

/// Ramer-Douglas-Peucker simplification, no topology guarantee
#[derive(Debug, Clone, Copy, Default)]
pub struct DouglasPeucker;

impl Simplifier for DouglasPeucker {
    fn simplify(&self, line: &LineString<f64>, tolerance: f64) -> LineString<f64> {
        if line.0.len() < 3 {
            return line.clone();
        }
        line.simplify(&tolerance)
    }
}

/// Douglas-Peucker variant that never introduces a crossing
///
/// A run of coordinates is only collapsed to its shortcut when the shortcut
/// does not cross any other segment of the line as it currently stands.
/// Closed lines keep at least four coordinates so they stay rings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyPreserving;

impl Simplifier for TopologyPreserving {
    fn simplify(&self, line: &LineString<f64>, tolerance: f64) -> LineString<f64> {
        let coords = &line.0;
        if coords.len() < 3 {
            return line.clone();
        }

        let mut keep = vec![true; coords.len()];
        let closed = line.is_closed();
        simplify_section(coords, 0, coords.len() - 1, tolerance, closed, &mut keep);

        let kept: Vec<Coord<f64>> = coords
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| *c)
            .collect();
        LineString::new(kept)
    }
}

fn simplify_section(
    coords: &[Coord<f64>],
    i: usize,
    j: usize,
    tolerance: f64,
    closed: bool,
    keep: &mut [bool],
) {
    if j <= i + 1 {
        return;
    }

    let shortcut = Line::new(coords[i], coords[j]);
    let (furthest, distance) = (i + 1..j)
        .map(|k| (k, segment_distance(coords[k], shortcut)))
        .fold((i + 1, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    let whole_ring = closed && i == 0 && j == coords.len() - 1;
    if distance <= tolerance && !whole_ring && !crosses_kept(coords, keep, i, j, shortcut) {
        for k in keep.iter_mut().take(j).skip(i + 1) {
            *k = false;
        }
        return;
    }

    simplify_section(coords, i, furthest, tolerance, closed, keep);
    simplify_section(coords, furthest, j, tolerance, closed, keep);
}

/// Does `shortcut` (spanning coords i..=j) cross any kept segment outside that span?
fn crosses_kept(
    coords: &[Coord<f64>],
    keep: &[bool],
    i: usize,
    j: usize,
    shortcut: Line<f64>,
) -> bool {
    let kept: Vec<usize> = (0..coords.len()).filter(|&k| keep[k]).collect();

    kept.windows(2)
        .filter(|w| w[1] <= i || w[0] >= j)
        .any(|w| {
            let other = Line::new(coords[w[0]], coords[w[1]]);
            match line_intersection(shortcut, other) {
                None => false,
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    intersection != shortcut.start && intersection != shortcut.end
                }
                Some(LineIntersection::Collinear { .. }) => true,
            }
        })
}

/// Distance from `p` to the closest point of `line`
fn segment_distance(p: Coord<f64>, line: Line<f64>) -> f64 {
    let d = line.delta();
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return (p.x - line.start.x).hypot(p.y - line.start.y);
    }
    let t = (((p.x - line.start.x) * d.x + (p.y - line.start.y) * d.y) / len_sq).clamp(0.0, 1.0);
    let cx = line.start.x + t * d.x;
    let cy = line.start.y + t * d.y;
    (p.x - cx).hypot(p.y - cy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn line(points: &[(f64, f64)]) -> LineString<f64> {
        points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()
    }

    #[test]
    fn test_simplify_short_line_unchanged() {
        let l = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(DouglasPeucker.simplify(&l, 1.0), l);
        assert_eq!(TopologyPreserving.simplify(&l, 1.0), l);
    }

    #[test]
    fn test_simplify_reduces_points() {
        let points: Vec<(f64, f64)> = (0..100)
            .map(|i| (i as f64, if i % 2 == 0 { 0.0 } else { 0.0001 }))
            .collect();
        let l = line(&points);

        let dp = DouglasPeucker.simplify(&l, 0.001);
        let tp = TopologyPreserving.simplify(&l, 0.001);
        assert_eq!(dp.0.len(), 2);
        assert_eq!(tp.0.len(), 2);
    }

    #[test]
    fn test_simplify_keeps_corners() {
        let l = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        assert_eq!(TopologyPreserving.simplify(&l, 0.1).0.len(), 3);
    }

    #[test]
    fn test_ring_stays_a_ring() {
        let l = line(&[(0.0, 0.0), (0.1, 0.0), (0.1, 0.1), (0.0, 0.1), (0.0, 0.0)]);
        let simplified = TopologyPreserving.simplify(&l, 1.0);
        assert!(simplified.is_closed());
        assert!(simplified.0.len() >= 4);
    }

    #[test]
    fn test_shortcut_that_would_cross_is_refused() {
        // The hump at (2, 0.5) is within tolerance of the base, but the final
        // spur reaches up through the base, so flattening the hump would cross it.
        let l = line(&[
            (0.0, 0.0),
            (2.0, 0.5),
            (4.0, 0.0),
            (4.0, -2.0),
            (2.0, -2.0),
            (2.0, 0.2),
        ]);
        let simplified = TopologyPreserving.simplify(&l, 0.8);
        assert!(simplified.0.contains(&coord! { x: 2.0, y: 0.5 }));

        let segments: Vec<Line<f64>> = simplified.lines().collect();
        for (a, sa) in segments.iter().enumerate() {
            for sb in segments.iter().skip(a + 2) {
                let hit = line_intersection(*sa, *sb);
                assert!(hit.is_none(), "simplified line crosses itself: {hit:?}");
            }
        }
    }

    #[test]
    fn test_segment_distance() {
        let l = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        assert_eq!(segment_distance(coord! { x: 5.0, y: 3.0 }, l), 3.0);
        assert_eq!(segment_distance(coord! { x: 13.0, y: 4.0 }, l), 5.0);
    }
}
