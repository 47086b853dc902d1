use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::NormalizedPath;

impl NormalizedPath {
    /// One LineString with a parallel `timestamps` property, the usual input for trip layers. A
    /// single observation can't be a LineString, so it becomes a Point. An empty path gives an
    /// empty collection.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::new();
        if !self.is_empty() {
            let mut coords: Vec<Vec<f64>> =
                self.points().iter().map(|pt| vec![pt.x(), pt.y()]).collect();
            let value = if coords.len() == 1 {
                Value::Point(coords.remove(0))
            } else {
                Value::LineString(coords)
            };
            let mut properties = JsonObject::new();
            properties.insert(
                "timestamps".to_string(),
                serde_json::to_value(self.timeline()).unwrap_or_default(),
            );
            properties.insert(
                "status".to_string(),
                serde_json::to_value(self.status()).unwrap_or_default(),
            );
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
