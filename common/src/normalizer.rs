//! 行の正規化
//!
//! 取得元の1行（RawRow）を見出し表記に依存しない CanonicalRecord に変換し、
//! 座標と地図リンクを決定する。純粋関数で、同じ行には常に同じ結果を返す。

use crate::alias::{AliasTable, Field, HeaderIndex};
use crate::coords::{derive_map_url, parse_coordinate_with, CoordinateOptions};
use crate::types::{CanonicalRecord, RawRow};

/// 行ノーマライザ
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
    coordinates: CoordinateOptions,
}

impl Normalizer {
    pub fn new(aliases: AliasTable, coordinates: CoordinateOptions) -> Self {
        Self { aliases, coordinates }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// 1行を正規化
    pub fn normalize(&self, row: &RawRow) -> CanonicalRecord {
        let index = HeaderIndex::build(row);
        let field = |f: Field| self.aliases.resolve(f, &index);

        let coords_raw = field(Field::Coords);
        let resolved_coordinate = parse_coordinate_with(&coords_raw, self.coordinates);
        let map_url = derive_map_url(resolved_coordinate.as_ref(), &field(Field::MapUrl));

        CanonicalRecord {
            title: field(Field::Title),
            country: field(Field::Country),
            kind: field(Field::Kind),
            years: field(Field::Years),
            height: field(Field::Height),
            description: field(Field::Description),
            myths: field(Field::Myths),
            coords_raw,
            resolved_coordinate,
            map_url,
            images_url: field(Field::ImagesUrl),
            visa: field(Field::Visa),
        }
    }

    /// 全行を元の順序で正規化
    pub fn normalize_all(&self, rows: &[RawRow]) -> Vec<CanonicalRecord> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }
}

/// 組み込みエイリアスで1行を正規化
pub fn normalize(row: &RawRow) -> CanonicalRecord {
    Normalizer::default().normalize(row)
}
