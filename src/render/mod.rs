//! 描画面
//!
//! 地図ウィジェット側に渡すのはマーカー（座標 + ポップアップ）と表示範囲だけ。
//! 描画面ごとに `MarkerSurface` を実装する。

pub mod geojson;
pub mod leaflet;

pub use geojson::GeoJsonSurface;
pub use leaflet::LeafletPage;

use landmark_map_common::{Coordinate, MapSession, Marker};
use serde::Serialize;

/// 表示範囲に足す余白の割合
pub const FIT_PADDING: f64 = 0.2;

pub trait MarkerSurface {
    fn add_marker(&mut self, coordinate: Coordinate, popup: &str);

    fn fit_view_to_markers(&mut self, coordinates: &[Coordinate]);

    /// 検索用の値（名称・国・種類）を登録。add_marker と同じ順序で呼ばれる
    fn index_marker(&mut self, _marker: &Marker) {}
}

/// セッションの全マーカーを描画面に載せる
///
/// マーカーが1つもなければ表示範囲は変えない（初期表示のまま）。
pub fn render_session<S: MarkerSurface>(session: &MapSession, surface: &mut S) {
    for marker in &session.markers {
        surface.add_marker(marker.coordinate, &marker.popup);
        surface.index_marker(marker);
    }

    let coordinates = session.coordinates();
    if !coordinates.is_empty() {
        surface.fit_view_to_markers(&coordinates);
    }
}

/// 緯度経度の矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        let first = coordinates.first()?;
        let init = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(coordinates.iter().skip(1).fold(init, |b, c| Bounds {
            south: b.south.min(c.lat),
            west: b.west.min(c.lng),
            north: b.north.max(c.lat),
            east: b.east.max(c.lng),
        }))
    }

    /// 各辺を高さ・幅の `ratio` 倍だけ広げる
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lng_buffer = (self.east - self.west).abs() * ratio;
        Bounds {
            south: self.south - lat_buffer,
            west: self.west - lng_buffer,
            north: self.north + lat_buffer,
            east: self.east + lng_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        markers: Vec<(Coordinate, String)>,
        fitted: Option<Vec<Coordinate>>,
    }

    impl MarkerSurface for RecordingSurface {
        fn add_marker(&mut self, coordinate: Coordinate, popup: &str) {
            self.markers.push((coordinate, popup.to_string()));
        }

        fn fit_view_to_markers(&mut self, coordinates: &[Coordinate]) {
            self.fitted = Some(coordinates.to_vec());
        }
    }

    #[test]
    fn test_bounds_from_coordinates() {
        let bounds = Bounds::from_coordinates(&[
            Coordinate::new(10.0, 20.0),
            Coordinate::new(-5.0, 40.0),
            Coordinate::new(2.0, 30.0),
        ])
        .unwrap();
        assert_eq!(bounds, Bounds { south: -5.0, west: 20.0, north: 10.0, east: 40.0 });
        assert!(Bounds::from_coordinates(&[]).is_none());
    }

    #[test]
    fn test_bounds_pad() {
        let bounds = Bounds { south: 0.0, west: 0.0, north: 10.0, east: 20.0 }.pad(FIT_PADDING);
        assert_eq!(bounds, Bounds { south: -2.0, west: -4.0, north: 12.0, east: 24.0 });
    }

    #[test]
    fn test_render_empty_session_keeps_default_view() {
        let mut surface = RecordingSurface::default();
        render_session(&MapSession::default(), &mut surface);
        assert!(surface.markers.is_empty());
        assert!(surface.fitted.is_none());
    }
}
