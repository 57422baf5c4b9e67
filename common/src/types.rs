//! 表データと正規化レコードの型定義
//!
//! CLIと共通ライブラリで共有される型:
//! - RawRow: 取得元の1行（見出し → セル値）
//! - CanonicalRecord: 見出し表記に依存しない正規化済みレコード
//! - Marker: 地図に配置する1点（座標 + ポップアップHTML）

use serde::{Deserialize, Serialize};

/// 取得元の1行
///
/// 見出しは取得元のまま保持する。列順を保持するので、
/// 大文字小文字を無視して同じになる見出しは後の列が優先される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// セルを追加（同じ見出しが既にあれば値を置き換える）
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((header, value)),
        }
    }

    /// 見出し（完全一致）で値を取得
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 全セルが空かどうか
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

impl<H, V> FromIterator<(H, V)> for RawRow
where
    H: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 緯度 [-90, 90]、経度 [-180, 180] に収まるか
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// 正規化済みレコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub title: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub years: String,
    pub height: String,
    pub description: String,
    pub myths: String,
    /// 元の座標文字列
    pub coords_raw: String,
    /// 解析できた座標（配置可能な場合のみ）
    pub resolved_coordinate: Option<Coordinate>,
    /// 地図リンク（常に空でない: 座標検索URL、行のリンク、または "#"）
    pub map_url: String,
    pub images_url: String,
    pub visa: String,
}

impl CanonicalRecord {
    pub fn is_placeable(&self) -> bool {
        self.resolved_coordinate.is_some()
    }
}

/// 地図マーカー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub coordinate: Coordinate,
    /// 描画済みポップアップHTML
    pub popup: String,
    /// 検索用（エスケープ前の値）
    pub title: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_insert_replaces_same_header() {
        let mut row = RawRow::new();
        row.insert("Название", "A");
        row.insert("Название", "B");
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Название"), Some("B"));
    }

    #[test]
    fn test_raw_row_from_iter_keeps_order() {
        let row: RawRow = [("b", "2"), ("a", "1")].into_iter().collect();
        let headers: Vec<&str> = row.iter().map(|(h, _)| h).collect();
        assert_eq!(headers, vec!["b", "a"]);
    }

    #[test]
    fn test_raw_row_is_blank() {
        let row: RawRow = [("a", " "), ("b", "")].into_iter().collect();
        assert!(row.is_blank());
        let row: RawRow = [("a", "x")].into_iter().collect();
        assert!(!row.is_blank());
    }

    #[test]
    fn test_canonical_record_default_is_empty_strings() {
        let record = CanonicalRecord::default();
        assert_eq!(record.title, "");
        assert!(!record.is_placeable());
    }

    #[test]
    fn test_canonical_record_serializes_type_key() {
        let record = CanonicalRecord {
            kind: "Башня".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Башня");
        assert!(json.get("coordsRaw").is_some());
        assert!(json.get("resolvedCoordinate").is_some());
    }

    #[test]
    fn test_coordinate_in_range() {
        assert!(Coordinate::new(48.8, 2.3).in_range());
        assert!(!Coordinate::new(91.0, 0.0).in_range());
        assert!(!Coordinate::new(0.0, -180.5).in_range());
    }
}
