//! 描画セッション
//!
//! 1回の読み込みで得たレコードとマーカーを保持する。
//! 再読み込みで作り直し、永続化はしない。

use crate::normalizer::Normalizer;
use crate::popup::{render_popup, PopupLabels};
use crate::search::SearchIndex;
use crate::types::{CanonicalRecord, Coordinate, Marker, RawRow};

/// 1回分の読み込み結果
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    /// 取得した全行の正規化結果（元の順序）
    pub records: Vec<CanonicalRecord>,
    /// 配置可能なレコードのマーカー（元の順序）
    pub markers: Vec<Marker>,
    /// 座標を解決できなかった行の位置（0始まり）
    pub unplaceable: Vec<usize>,
    index: SearchIndex,
}

impl MapSession {
    /// 取得行数
    pub fn fetched_count(&self) -> usize {
        self.records.len()
    }

    /// 配置数
    pub fn placed_count(&self) -> usize {
        self.markers.len()
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.markers.iter().map(|m| m.coordinate).collect()
    }

    /// 検索に一致するマーカー
    pub fn search(&self, query: &str) -> Vec<&Marker> {
        self.index
            .matches(query)
            .into_iter()
            .filter_map(|i| self.markers.get(i))
            .collect()
    }
}

/// 行からマーカーを作る
pub fn make_marker(record: &CanonicalRecord, labels: &PopupLabels) -> Option<Marker> {
    let coordinate = record.resolved_coordinate?;
    Some(Marker {
        coordinate,
        popup: render_popup(record, labels),
        title: record.title.clone(),
        country: record.country.clone(),
        kind: record.kind.clone(),
    })
}

/// 取得行からセッションを組み立てる
pub fn build_session(rows: &[RawRow], normalizer: &Normalizer, labels: &PopupLabels) -> MapSession {
    let records = normalizer.normalize_all(rows);

    let mut markers = Vec::new();
    let mut unplaceable = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match make_marker(record, labels) {
            Some(marker) => markers.push(marker),
            None => unplaceable.push(i),
        }
    }

    let index = SearchIndex::build(&markers);
    MapSession {
        records,
        markers,
        unplaceable,
        index,
    }
}
