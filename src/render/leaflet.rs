//! Leaflet を使った単一HTMLページの生成
//!
//! マーカーはクラスタ表示。ホバーでポップアップを開き、クリックで固定する。
//! 検索欄は入力が止まってから `searchDebounceMs` 後に絞り込む。

use super::{Bounds, MarkerSurface, FIT_PADDING};
use crate::config::{Config, DefaultView};
use landmark_map_common::{escape_html, Coordinate, Marker, SearchIndex};
use serde::Serialize;

const LEAFLET_VERSION: &str = "1.9.4";
const MARKERCLUSTER_VERSION: &str = "1.5.3";

#[derive(Debug, Clone, Serialize)]
struct PageMarker {
    lat: f64,
    lng: f64,
    popup: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    markers: &'a [PageMarker],
    /// マーカーと同じ順序の検索対象文字列（小文字）
    search: &'a [String],
    bounds: Option<Bounds>,
    default_view: DefaultView,
    tile_url: &'a str,
    tile_attribution: &'a str,
    debounce_ms: u64,
}

/// HTMLページ描画面
#[derive(Debug, Clone)]
pub struct LeafletPage {
    title: String,
    tile_url: String,
    tile_attribution: String,
    default_view: DefaultView,
    debounce_ms: u64,
    markers: Vec<PageMarker>,
    search: Vec<String>,
    bounds: Option<Bounds>,
    generated_at: String,
}

impl LeafletPage {
    pub fn new(config: &Config, title: &str) -> Self {
        Self {
            title: title.to_string(),
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
            default_view: config.default_view,
            debounce_ms: config.search_debounce_ms,
            markers: Vec::new(),
            search: Vec::new(),
            bounds: None,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// 表示範囲（余白込み）。マーカーがなければ None
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn to_html(&self) -> crate::error::Result<String> {
        let data = PageData {
            markers: &self.markers,
            search: &self.search,
            bounds: self.bounds,
            default_view: self.default_view,
            tile_url: &self.tile_url,
            tile_attribution: &self.tile_attribution,
            debounce_ms: self.debounce_ms,
        };
        let json = embed_json(&serde_json::to_string(&data)?);

        Ok(PAGE_TEMPLATE
            .replace("__TITLE__", &escape_html(&self.title))
            .replace("__LEAFLET__", LEAFLET_VERSION)
            .replace("__CLUSTER__", MARKERCLUSTER_VERSION)
            .replace("__GENERATED__", &escape_html(&self.generated_at))
            .replace("__COUNT__", &self.markers.len().to_string())
            .replace("__DATA__", &json))
    }
}

impl MarkerSurface for LeafletPage {
    fn add_marker(&mut self, coordinate: Coordinate, popup: &str) {
        self.markers.push(PageMarker {
            lat: coordinate.lat,
            lng: coordinate.lng,
            popup: popup.to_string(),
        });
    }

    fn fit_view_to_markers(&mut self, coordinates: &[Coordinate]) {
        self.bounds = Bounds::from_coordinates(coordinates).map(|b| b.pad(FIT_PADDING));
    }

    fn index_marker(&mut self, marker: &Marker) {
        self.search.push(SearchIndex::haystack(marker));
    }
}

/// `<script>` 内に埋め込めるようにする
///
/// `<` `>` `&` を JSON の Unicode エスケープに置き換えるので、
/// `</script>` や `<!--` が値に含まれてもスクリプト要素は閉じない。
fn embed_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@__CLUSTER__/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@__CLUSTER__/dist/MarkerCluster.Default.css">
<style>
html, body { margin: 0; height: 100%; background: #111; color: #eee; font-family: sans-serif; }
#map { position: absolute; inset: 0; }
#panel { position: absolute; top: 10px; left: 50px; z-index: 1000; background: rgba(20,20,20,.85); padding: 6px 10px; border-radius: 6px; }
#panel input { width: 240px; padding: 4px 6px; background: #222; color: #eee; border: 1px solid #444; border-radius: 4px; }
#panel small { display: block; margin-top: 4px; color: #999; }
.popup h3 { margin: 0 0 4px; }
.popup .meta { color: #666; margin-bottom: 6px; }
.popup .row { margin: 3px 0; }
.popup .badge { background: #2a6; color: #fff; padding: 1px 6px; border-radius: 8px; }
</style>
</head>
<body>
<div id="map"></div>
<div id="panel">
<input id="search" type="search" placeholder="Поиск / Search" autocomplete="off">
<small><span id="shown">__COUNT__</span> / __COUNT__ · __GENERATED__</small>
</div>
<script src="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@__CLUSTER__/dist/leaflet.markercluster.js"></script>
<script>
(function () {
  var data = __DATA__;
  var map = L.map('map', { worldCopyJump: true });
  L.tileLayer(data.tileUrl, { attribution: data.tileAttribution, maxZoom: 19 }).addTo(map);

  var cluster = L.markerClusterGroup();
  var layers = data.markers.map(function (m) {
    var marker = L.marker([m.lat, m.lng]).bindPopup(m.popup);
    marker.on('mouseover', function () { marker.openPopup(); });
    return marker;
  });
  layers.forEach(function (layer) { cluster.addLayer(layer); });
  map.addLayer(cluster);

  if (data.bounds) {
    map.fitBounds([[data.bounds.south, data.bounds.west], [data.bounds.north, data.bounds.east]]);
  } else {
    map.setView([data.defaultView.lat, data.defaultView.lng], data.defaultView.zoom);
  }

  var shown = document.getElementById('shown');
  function applyFilter(query) {
    var q = query.trim().toLowerCase();
    cluster.clearLayers();
    var visible = layers.filter(function (_, i) { return q === '' || data.search[i].indexOf(q) !== -1; });
    cluster.addLayers(visible);
    shown.textContent = visible.length;
  }

  var timer = null;
  document.getElementById('search').addEventListener('input', function (e) {
    var value = e.target.value;
    clearTimeout(timer);
    timer = setTimeout(function () { applyFilter(value); }, data.debounceMs);
  });
})();
</script>
</body>
</html>
"#;
