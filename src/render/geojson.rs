//! GeoJSON 出力
//!
//! 他の地図ツールに持ち込む用。座標順は GeoJSON の規約どおり [経度, 緯度]。

use super::{Bounds, MarkerSurface};
use landmark_map_common::{Coordinate, Marker};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Default)]
pub struct GeoJsonSurface {
    points: Vec<(Coordinate, String)>,
    properties: Vec<Map<String, Value>>,
    bbox: Option<Bounds>,
}

impl GeoJsonSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature_count(&self) -> usize {
        self.points.len()
    }

    pub fn to_value(&self) -> Value {
        let features: Vec<Value> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (coordinate, popup))| {
                let mut properties = self.properties.get(i).cloned().unwrap_or_default();
                properties.insert("popup".into(), Value::String(popup.clone()));
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [coordinate.lng, coordinate.lat],
                    },
                    "properties": properties,
                })
            })
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(b) = self.bbox {
            collection["bbox"] = json!([b.west, b.south, b.east, b.north]);
        }
        collection
    }

    pub fn to_string_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}

impl MarkerSurface for GeoJsonSurface {
    fn add_marker(&mut self, coordinate: Coordinate, popup: &str) {
        self.points.push((coordinate, popup.to_string()));
    }

    /// bbox には余白を付けない
    fn fit_view_to_markers(&mut self, coordinates: &[Coordinate]) {
        self.bbox = Bounds::from_coordinates(coordinates);
    }

    fn index_marker(&mut self, marker: &Marker) {
        let mut properties = Map::new();
        properties.insert("title".into(), Value::String(marker.title.clone()));
        properties.insert("country".into(), Value::String(marker.country.clone()));
        properties.insert("type".into(), Value::String(marker.kind.clone()));
        self.properties.push(properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_lng_lat() {
        let mut surface = GeoJsonSurface::new();
        surface.add_marker(Coordinate::new(48.8584, 2.2945), "p");
        let value = surface.to_value();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!([2.2945, 48.8584]));
        assert_eq!(value["features"][0]["properties"]["popup"], "p");
        assert!(value.get("bbox").is_none());
    }

    #[test]
    fn test_bbox_is_unpadded() {
        let mut surface = GeoJsonSurface::new();
        let coords = [Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 20.0)];
        for c in coords {
            surface.add_marker(c, "");
        }
        surface.fit_view_to_markers(&coords);
        assert_eq!(surface.to_value()["bbox"], json!([0.0, 0.0, 20.0, 10.0]));
    }
}
