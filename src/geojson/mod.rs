//! GeoJSON input and output
//!
//! Only the small subset this crate reads and writes is modelled: a
//! MultiPoint feature of `[lon, lat, value]` positions coming in, and a
//! FeatureCollection of LineStrings going out.

pub mod encode;
pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use encode::{encode_features, to_json_string};
pub use normalize::{Normalizer, normalize_points, parse_points, read_positions};

/// Raw input document: either a Feature or a bare geometry
#[derive(Debug, Deserialize)]
pub struct InputDocument {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub geometry: Option<InputGeometry>,
    #[serde(default)]
    pub coordinates: Option<Value>,
}

/// Geometry of an input Feature; coordinates stay untyped until the
/// geometry type is known
#[derive(Debug, Deserialize)]
pub struct InputGeometry {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Value>,
}

/// Output collection of contour features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub type_: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub type_: String,
    pub geometry: LineStringGeometry,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringGeometry {
    #[serde(rename = "type")]
    pub type_: String,
    pub coordinates: Vec<[f64; 2]>,
}
