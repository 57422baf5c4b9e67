//! 設定ファイルの読み書きテスト

use landmark_map::config::{Config, Protocol};
use landmark_map_common::Locale;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("none.json")).expect("読み込み失敗");
    assert!(config.source_id.is_none());
    assert_eq!(config.protocol, Protocol::Query);
    assert_eq!(config.locale, Locale::Ru);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("landmark-map").join("config.json");

    let mut config = Config::default();
    config.source_id = Some("abc".into());
    config.protocol = Protocol::Csv;
    config.column_aliases.insert("coords".into(), "GPS".into());
    config.save_to(&path).expect("保存失敗");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"sourceId\": \"abc\""));
    assert!(content.contains("\"protocol\": \"csv\""));

    let reloaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(reloaded.source_id.as_deref(), Some("abc"));
    assert_eq!(reloaded.protocol, Protocol::Csv);
    assert_eq!(reloaded.column_aliases.get("coords").map(String::as_str), Some("GPS"));
}

#[test]
fn test_column_override_takes_precedence() {
    let mut config = Config::default();
    config.column_aliases.insert("coords".into(), "GPS".into());
    let normalizer = config.normalizer().expect("ノーマライザ生成失敗");

    let row = [("Координаты", "1,1"), ("GPS", "48.8584,2.2945")]
        .into_iter()
        .collect();
    let record = normalizer.normalize(&row);
    assert_eq!(record.coords_raw, "48.8584,2.2945");
}

#[test]
fn test_invalid_json_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Config::load_from(&path).is_err());
}
