//! 見出しエイリアスモジュール
//!
//! 表データの列見出しの表記ゆれ（ロシア語/英語、旧バージョンの見出し）を
//! 正規フィールドに対応付ける。照合は大文字小文字を無視した完全一致。

use crate::error::{Error, Result};
use crate::types::RawRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 正規フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Country,
    #[serde(rename = "type")]
    Kind,
    Years,
    Height,
    Description,
    Myths,
    Coords,
    MapUrl,
    ImagesUrl,
    Visa,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Title,
        Field::Country,
        Field::Kind,
        Field::Years,
        Field::Height,
        Field::Description,
        Field::Myths,
        Field::Coords,
        Field::MapUrl,
        Field::ImagesUrl,
        Field::Visa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Country => "country",
            Field::Kind => "type",
            Field::Years => "years",
            Field::Height => "height",
            Field::Description => "description",
            Field::Myths => "myths",
            Field::Coords => "coords",
            Field::MapUrl => "mapUrl",
            Field::ImagesUrl => "imagesUrl",
            Field::Visa => "visa",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name().to_lowercase() == key)
            .ok_or_else(|| Error::Config(format!("不明なフィールド: {}", s)))
    }
}

/// 組み込みエイリアス
///
/// 見出しは予告なく変わってきたので、過去に使われた表記は削除しないこと。
pub const DEFAULT_ALIASES: &[(Field, &[&str])] = &[
    (Field::Title, &["Название", "name", "title"]),
    (Field::Country, &["Страна", "country"]),
    (Field::Kind, &["Тип", "type"]),
    (Field::Years, &["Год постройки", "Год", "Годы", "year", "years"]),
    (Field::Height, &["Высота/размер", "Высота", "Размер", "height", "size"]),
    (Field::Description, &["Краткое описание", "Описание", "description"]),
    (
        Field::Myths,
        &["Мифы/легенды/известные люди", "Мифы и легенды", "Мифы", "myths"],
    ),
    (Field::Coords, &["Координаты", "coords", "coordinates"]),
    (
        Field::MapUrl,
        &["Google Maps", "Ссылка на карту", "map", "maps", "mapsUrl", "map_url"],
    ),
    (
        Field::ImagesUrl,
        &["Фото", "Ссылка на фото", "photo", "images", "imagesUrl", "images_url"],
    ),
    (
        Field::Visa,
        &["Визовый режим (для граждан Украины)", "Визы (UA)", "visa"],
    ),
];

/// 小文字化した見出し → 値 の索引
#[derive(Debug, Default)]
pub struct HeaderIndex<'a> {
    entries: HashMap<String, &'a str>,
}

impl<'a> HeaderIndex<'a> {
    pub fn build(row: &'a RawRow) -> Self {
        let mut entries = HashMap::with_capacity(row.len());
        for (header, value) in row.iter() {
            // 小文字で衝突した場合は後の列が勝つ
            entries.insert(header.trim().to_lowercase(), value);
        }
        Self { entries }
    }

    pub fn get(&self, lower_header: &str) -> Option<&'a str> {
        self.entries.get(lower_header).copied()
    }
}

/// フィールドごとの受理見出し一覧（小文字化済み）
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<(Field, Vec<String>)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let entries = DEFAULT_ALIASES
            .iter()
            .map(|(field, variants)| {
                (*field, variants.iter().map(|v| v.to_lowercase()).collect())
            })
            .collect();
        Self { entries }
    }
}

impl AliasTable {
    /// 列見出しの上書き設定（フィールド名 → 見出し）を適用したテーブルを作る
    ///
    /// 上書きした見出しは組み込みエイリアスより先に照合される。
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut table = Self::default();
        for (field_name, header) in overrides {
            let field: Field = field_name.parse()?;
            table.prepend(field, header);
        }
        Ok(table)
    }

    /// JSON文字列（{"title": "Мой заголовок"}）から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        Self::with_overrides(&overrides)
    }

    fn prepend(&mut self, field: Field, header: &str) {
        let header = header.trim().to_lowercase();
        if header.is_empty() {
            return;
        }
        if let Some((_, variants)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            variants.retain(|v| *v != header);
            variants.insert(0, header);
        }
    }

    pub fn variants(&self, field: Field) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// 最初に見つかったエイリアスの値を返す。なければ空文字列
    pub fn resolve(&self, field: Field, index: &HeaderIndex<'_>) -> String {
        self.variants(field)
            .iter()
            .find_map(|alias| index.get(alias))
            .map(str::to_string)
            .unwrap_or_default()
    }
}
