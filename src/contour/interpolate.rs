use geo::{Coord, coord};
use serde::Deserialize;

use crate::domain::Point3D;
use crate::error::{ContourError, Result};

/// Values this close to a grid line are treated as lying on it, so a
/// coordinate that is already on the grid is never pushed to the next step.
const GRID_SNAP: f64 = 1e-9;

/// How interpolated coordinates are snapped to the decimal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Round up to the next grid step (legacy output, biased toward larger values)
    #[default]
    Ceil,
    /// Round to the nearest grid step
    Nearest,
    /// Keep full precision
    None,
}

/// Snaps coordinates to a fixed number of decimals
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    policy: RoundingPolicy,
    factor: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(RoundingPolicy::Ceil, 3)
    }
}

impl Quantizer {
    pub fn new(policy: RoundingPolicy, decimals: u32) -> Self {
        Self {
            policy,
            factor: 10f64.powi(decimals as i32),
        }
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Snap a single value to the grid
    pub fn apply(&self, value: f64) -> f64 {
        let scaled = value * self.factor;
        match self.policy {
            RoundingPolicy::None => value,
            RoundingPolicy::Nearest => scaled.round() / self.factor,
            RoundingPolicy::Ceil => {
                let nearest = scaled.round();
                if (scaled - nearest).abs() <= GRID_SNAP {
                    nearest / self.factor
                } else {
                    scaled.ceil() / self.factor
                }
            }
        }
    }
}

/// Fraction of the way from `v0` to `v1` at which `threshold` is reached
pub fn crossing_ratio(v0: f64, v1: f64, threshold: f64) -> Result<f64> {
    let span = v1 - v0;
    if span == 0.0 || !span.is_finite() {
        return Err(ContourError::DegenerateEdge { v0, v1, threshold });
    }
    Ok((threshold - v0) / span)
}

/// Point on the edge `start -> end` where the surface reaches `threshold`
///
/// The edge is always walked from its lower-valued end, so the two triangles
/// sharing an edge produce bit-identical crossings.
///
/// # Errors
/// `DegenerateEdge` when both endpoints carry the same value or the result
/// is not a finite coordinate.
pub fn interpolate_edge(
    start: &Point3D,
    end: &Point3D,
    threshold: f64,
    quantizer: &Quantizer,
) -> Result<Coord<f64>> {
    let (start, end) = if end.z < start.z { (end, start) } else { (start, end) };
    let a = crossing_ratio(start.z, end.z, threshold)?;

    let x = start.x + (end.x - start.x) * a;
    let y = start.y + (end.y - start.y) * a;

    if !x.is_finite() || !y.is_finite() {
        return Err(ContourError::DegenerateEdge {
            v0: start.z,
            v1: end.z,
            threshold,
        });
    }

    Ok(coord! { x: quantizer.apply(x), y: quantizer.apply(y) })
}
