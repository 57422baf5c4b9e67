use crate::error::{LandmarkMapError, Result};
use landmark_map_common::{AliasTable, CoordinateOptions, Locale, Normalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://carto.com/" target="_blank" rel="noopener">CARTO</a>"#;

/// 取得プロトコル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// クエリプロトコル（JSONエンベロープ）
    #[default]
    #[serde(rename = "gviz")]
    #[value(name = "gviz")]
    Query,
    /// CSVエクスポート
    Csv,
}

/// マーカーがないときの初期表示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl Default for DefaultView {
    fn default() -> Self {
        Self { lat: 20.0, lng: 0.0, zoom: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub source_id: Option<String>,
    pub sub_sheet_name: Option<String>,
    pub sub_sheet_id: Option<String>,
    pub base_url: String,
    pub protocol: Protocol,
    pub default_view: DefaultView,
    /// フィールド名 → 列見出し
    pub column_aliases: HashMap<String, String>,
    pub locale: Locale,
    pub legacy_coordinates: bool,
    pub validate_range: bool,
    pub search_debounce_ms: u64,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（なければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LandmarkMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("landmark-map").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            source_id: None,
            sub_sheet_name: None,
            sub_sheet_id: None,
            base_url: DEFAULT_BASE_URL.into(),
            protocol: Protocol::default(),
            default_view: DefaultView::default(),
            column_aliases: HashMap::new(),
            locale: Locale::default(),
            legacy_coordinates: false,
            validate_range: false,
            search_debounce_ms: 250,
            tile_url: DEFAULT_TILE_URL.into(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.into(),
        }
    }

    pub fn require_source_id(&self) -> Result<&str> {
        self.source_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(LandmarkMapError::MissingSourceId)
    }

    pub fn coordinate_options(&self) -> CoordinateOptions {
        CoordinateOptions {
            legacy: self.legacy_coordinates,
            validate_range: self.validate_range,
        }
    }

    /// 列見出しの上書きを反映したノーマライザ
    pub fn normalizer(&self) -> Result<Normalizer> {
        let aliases = AliasTable::with_overrides(&self.column_aliases)?;
        Ok(Normalizer::new(aliases, self.coordinate_options()))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.protocol, Protocol::Query);
        assert_eq!(config.default_view, DefaultView { lat: 20.0, lng: 0.0, zoom: 2 });
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"sourceId": "abc", "protocol": "csv", "locale": "en"}"#).unwrap();
        assert_eq!(config.source_id.as_deref(), Some("abc"));
        assert_eq!(config.protocol, Protocol::Csv);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.search_debounce_ms, 250);
    }

    #[test]
    fn test_require_source_id() {
        let mut config = Config::default();
        assert!(matches!(config.require_source_id(), Err(LandmarkMapError::MissingSourceId)));
        config.source_id = Some("  ".into());
        assert!(config.require_source_id().is_err());
        config.source_id = Some("abc".into());
        assert_eq!(config.require_source_id().unwrap(), "abc");
    }

    #[test]
    fn test_normalizer_rejects_unknown_alias_field() {
        let mut config = Config::default();
        config.column_aliases.insert("altitude".into(), "Высота".into());
        assert!(config.normalizer().is_err());
    }
}
