//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use landmark_map::config::Config;
use landmark_map::error::LandmarkMapError;
use landmark_map::source::{Source, TabularSource, XlsxSource};
use std::path::Path;

/// IDなしでネットワーク取得を組み立てた場合
#[test]
fn test_missing_source_id() {
    let result = Source::from_config(&Config::default(), None);
    let err = result.err().expect("エラーになるべき");
    assert!(matches!(err, LandmarkMapError::MissingSourceId));
    assert!(!err.is_load_failure());
}

/// 存在しない表計算ファイル
#[tokio::test]
async fn test_xlsx_file_not_found() {
    let source = XlsxSource::new(Path::new("/nonexistent/path/12345.xlsx"), None);
    let err = source.fetch_rows().await.unwrap_err();
    assert!(matches!(err, LandmarkMapError::FileNotFound(_)));
    assert!(err.is_load_failure());
}

/// 表計算ファイルとして読めない内容
#[tokio::test]
async fn test_xlsx_garbage_is_decode_failure() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    let err = XlsxSource::new(&path, None).fetch_rows().await.unwrap_err();
    assert!(matches!(err, LandmarkMapError::Decode(_)));
}

/// 共通ライブラリのエラーはそのままのメッセージで伝播
#[test]
fn test_common_error_is_transparent() {
    let inner = landmark_map_common::Error::Config("x".into());
    let message = inner.to_string();
    let err: LandmarkMapError = inner.into();
    assert_eq!(err.to_string(), message);
}

#[test]
fn test_error_messages() {
    let err = LandmarkMapError::HttpStatus {
        url: "http://h/x".into(),
        status: 500,
    };
    assert!(err.to_string().contains("HTTP 500"));
    assert!(LandmarkMapError::Decode("bad".into()).to_string().contains("bad"));
}
