use thiserror::Error;

/// Errors produced while turning a point set into contour lines
#[derive(Debug, Error)]
pub enum ContourError {
    /// The input document is `null` or carries no `type`
    #[error("GeoJSON input must not be empty")]
    EmptyInput,

    /// The input geometry is not a MultiPoint
    #[error("GeoJSON geometry must be a MultiPoint, found {found}")]
    UnsupportedGeometry { found: String },

    /// A threshold token could not be read as a finite number
    #[error("invalid threshold value: {token:?}")]
    ThresholdParse { token: String },

    /// A MultiPoint position without a value component
    #[error("coordinate {index} has {len} components, expected [lon, lat, value]")]
    MalformedCoordinate { index: usize, len: usize },

    #[error("failed to parse GeoJSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Interpolation along an edge whose endpoints carry the same value
    #[error("cannot interpolate threshold {threshold} between values {v0} and {v1}")]
    DegenerateEdge { v0: f64, v1: f64, threshold: f64 },

    #[error("contour generation was cancelled")]
    Cancelled,

    /// Failure inside triangulation, merging or simplification
    #[error("contour generation failed: {0}")]
    Unclassified(String),
}

impl ContourError {
    /// True for errors caused by bad caller input, which can be reported back
    /// to the user instead of aborting as an internal failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::UnsupportedGeometry { .. }
                | Self::ThresholdParse { .. }
                | Self::MalformedCoordinate { .. }
                | Self::InvalidJson(_)
        )
    }
}

pub type Result<T, E = ContourError> = std::result::Result<T, E>;
