//! マーカー検索
//!
//! 名称・国・種類を小文字で連結した文字列に対する部分一致。

use crate::types::Marker;

/// 検索索引（マーカー列と同じ順序）
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    haystacks: Vec<String>,
}

impl SearchIndex {
    pub fn build(markers: &[Marker]) -> Self {
        let haystacks = markers.iter().map(Self::haystack).collect();
        Self { haystacks }
    }

    /// 1マーカー分の検索対象文字列（地図ページ側の検索も同じものを使う）
    pub fn haystack(marker: &Marker) -> String {
        format!("{} {} {}", marker.title, marker.country, marker.kind).to_lowercase()
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }

    /// 一致したマーカーの位置を返す。空クエリは全件
    pub fn matches(&self, query: &str) -> Vec<usize> {
        let query = query.trim().to_lowercase();
        self.haystacks
            .iter()
            .enumerate()
            .filter(|(_, hay)| query.is_empty() || hay.contains(&query))
            .map(|(i, _)| i)
            .collect()
    }
}
