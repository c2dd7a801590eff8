use serde_json::{Map, Value};

use super::{Feature, FeatureCollection, LineStringGeometry};
use crate::domain::ContourLine;
use crate::error::Result;

impl Feature {
    /// Wrap a contour line as a LineString feature
    pub fn from_line(line: &ContourLine, with_threshold: bool) -> Self {
        let mut properties = Map::new();
        if with_threshold {
            properties.insert("threshold".to_string(), Value::from(line.threshold));
        }

        Self {
            type_: "Feature".to_string(),
            geometry: LineStringGeometry {
                type_: "LineString".to_string(),
                coordinates: line.coords().iter().map(|c| [c.x, c.y]).collect(),
            },
            properties,
        }
    }
}

/// Wrap contour lines into a FeatureCollection
///
/// Properties stay empty unless `with_threshold` is set, in which case each
/// feature records the threshold it was traced at.
pub fn encode_features(lines: &[ContourLine], with_threshold: bool) -> FeatureCollection {
    FeatureCollection::new(
        lines
            .iter()
            .map(|line| Feature::from_line(line, with_threshold))
            .collect(),
    )
}

/// Serialize a FeatureCollection as GeoJSON text
pub fn to_json_string(collection: &FeatureCollection, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(collection)?
    } else {
        serde_json::to_string(collection)?
    };
    Ok(text)
}
