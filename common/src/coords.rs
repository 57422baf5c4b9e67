//! 座標の解析と地図リンク生成
//!
//! - 厳密形式: `<lat>,<lng>`（空白は全て除去してから照合）
//! - 旧形式（任意）: `<lat>;<lng>`、小数点にカンマを許容（`48,8;2,3`）

use crate::types::Coordinate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 座標が解析できないときの地図リンク
pub const PLACEHOLDER_URL: &str = "#";

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// 座標解析のオプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinateOptions {
    /// 旧形式（セミコロン区切り・カンマ小数点）も受け付ける
    pub legacy: bool,
    /// 緯度経度の範囲外を棄却する（補正はしない）
    pub validate_range: bool,
}

/// 座標文字列を解析（厳密形式のみ）
pub fn parse_coordinate(raw: &str) -> Option<Coordinate> {
    parse_coordinate_with(raw, CoordinateOptions::default())
}

/// 座標文字列を解析
///
/// 一致しなければ `None`。部分的な復元は行わない。
pub fn parse_coordinate_with(raw: &str, options: CoordinateOptions) -> Option<Coordinate> {
    lazy_static::lazy_static! {
        static ref STRICT_RE: Regex = Regex::new(r"^(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)$").unwrap();
        static ref LEGACY_RE: Regex = Regex::new(r"^(-?\d+(?:[.,]\d+)?);(-?\d+(?:[.,]\d+)?)$").unwrap();
    }

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let (lat, lng) = if let Some(caps) = STRICT_RE.captures(&compact) {
        (caps[1].to_string(), caps[2].to_string())
    } else if options.legacy {
        let caps = LEGACY_RE.captures(&compact)?;
        (caps[1].replace(',', "."), caps[2].replace(',', "."))
    } else {
        return None;
    };

    let lat: f64 = lat.parse().ok()?;
    let lng: f64 = lng.parse().ok()?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    let coordinate = Coordinate::new(lat, lng);
    if options.validate_range && !coordinate.in_range() {
        return None;
    }
    Some(coordinate)
}

/// 座標検索の地図URL
pub fn map_search_url(coordinate: &Coordinate) -> String {
    format!("{}{},{}", MAP_SEARCH_URL, coordinate.lat, coordinate.lng)
}

/// 地図リンクを決定
///
/// 座標があれば常に座標検索URL（行の地図リンクより優先）。
/// なければ行の地図リンク、それも空ならプレースホルダ。
pub fn derive_map_url(coordinate: Option<&Coordinate>, row_link: &str) -> String {
    match coordinate {
        Some(c) => map_search_url(c),
        None if !row_link.trim().is_empty() => row_link.trim().to_string(),
        None => PLACEHOLDER_URL.to_string(),
    }
}
