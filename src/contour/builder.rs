use geo::Line;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::classify::classify;
use super::interpolate::{Quantizer, interpolate_edge};
use crate::cancel::CancelToken;
use crate::domain::{RawContours, Segment};
use crate::error::Result;
use crate::mesh::{Mesh, Triangle};

/// Contour segment crossing one triangle at `threshold`, if any
pub fn segment_for_triangle(
    triangle: &Triangle<'_>,
    threshold: f64,
    quantizer: &Quantizer,
) -> Result<Option<Segment>> {
    let code = classify(triangle.vertices, threshold);
    let Some([(a0, a1), (b0, b1)]) = code.cut_edges() else {
        return Ok(None);
    };

    let v = &triangle.vertices;
    let start = interpolate_edge(v[a0], v[a1], threshold, quantizer)?;
    let end = interpolate_edge(v[b0], v[b1], threshold, quantizer)?;

    Ok(Some(Line::new(start, end)))
}

/// Trace every triangle of the mesh at one threshold
pub fn segments_for_threshold(
    mesh: &Mesh,
    threshold: f64,
    quantizer: &Quantizer,
    cancel: &CancelToken,
) -> Result<Vec<Segment>> {
    mesh.faces()
        .par_iter()
        .filter_map(|face| {
            if let Err(e) = cancel.check() {
                return Some(Err(e));
            }
            let triangle = mesh.triangle(face);
            cancel
                .guard(segment_for_triangle(&triangle, threshold, quantizer))
                .transpose()
        })
        .collect()
}

/// Trace all thresholds over the mesh
///
/// Every threshold gets its own output slot, in the order the thresholds were
/// given. The first failure trips `cancel` and aborts the whole build.
pub fn build_raw_contours(
    mesh: &Mesh,
    thresholds: &[f64],
    quantizer: &Quantizer,
    cancel: &CancelToken,
) -> Result<Vec<RawContours>> {
    let raw: Vec<RawContours> = thresholds
        .par_iter()
        .map(|&threshold| -> Result<RawContours> {
            cancel.check()?;
            let segments = segments_for_threshold(mesh, threshold, quantizer, cancel)?;
            trace!(threshold, segments = segments.len(), "threshold traced");
            Ok(RawContours::new(threshold, segments))
        })
        .collect::<Result<_>>()?;

    debug!(
        thresholds = raw.len(),
        segments = raw.iter().map(|r| r.segments.len()).sum::<usize>(),
        "raw contours built"
    );
    Ok(raw)
}
