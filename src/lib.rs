//! isolines - Generate smoothed contour lines from GeoJSON elevation points
//!
//! Points are triangulated, every triangle is classified against each
//! threshold (marching triangles), and the resulting segments are merged,
//! simplified and smoothed into LineString features.

pub mod cancel;
pub mod config;
pub mod contour;
pub mod domain;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod mesh;
pub mod pipeline;

pub use cancel::CancelToken;
pub use config::{ContourConfig, ShortLinePolicy};
pub use contour::RoundingPolicy;
pub use domain::{ContourLine, Point3D};
pub use error::{ContourError, Result};
pub use geojson::FeatureCollection;
pub use pipeline::{ContourOutput, ContourPipeline, ContourStats, build_contours};
