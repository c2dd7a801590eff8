use geo::{Coord, Line, LineString};

/// A raw contour crossing of one triangle: exactly two coordinates
pub type Segment = Line<f64>;

/// A smoothed contour polyline tagged with the threshold it was traced at
#[derive(Debug, Clone)]
pub struct ContourLine {
    pub threshold: f64,
    pub line: LineString<f64>,
}

impl ContourLine {
    pub fn new(threshold: f64, line: LineString<f64>) -> Self {
        Self { threshold, line }
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.line.0
    }

    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }
}

/// Segments traced for a single threshold, in triangle order
#[derive(Debug, Clone)]
pub struct RawContours {
    pub threshold: f64,
    pub segments: Vec<Segment>,
}

impl RawContours {
    pub fn new(threshold: f64, segments: Vec<Segment>) -> Self {
        Self {
            threshold,
            segments,
        }
    }
}
