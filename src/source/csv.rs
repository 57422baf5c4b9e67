//! CSV取得（エクスポートURLまたはローカルファイル）

use super::{fetch_text, TabularSource};
use crate::error::{LandmarkMapError, Result};
use landmark_map_common::{parse_csv, RawRow};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvLocation {
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    location: CsvLocation,
}

impl CsvSource {
    /// `GET <base>/<id>/export?format=csv&gid=<sheet id>`（gid 省略時は 0）
    pub fn remote(base_url: &str, source_id: &str, sheet_id: Option<&str>) -> Self {
        let gid = sheet_id.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("0");
        let url = format!(
            "{}/{}/export?format=csv&gid={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(source_id.trim()),
            urlencoding::encode(gid)
        );
        Self {
            location: CsvLocation::Remote(url),
        }
    }

    pub fn local(path: &Path) -> Self {
        Self {
            location: CsvLocation::Local(path.to_path_buf()),
        }
    }

    pub fn location(&self) -> &CsvLocation {
        &self.location
    }
}

impl TabularSource for CsvSource {
    fn describe(&self) -> String {
        match &self.location {
            CsvLocation::Remote(url) => url.clone(),
            CsvLocation::Local(path) => path.display().to_string(),
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let text = match &self.location {
            CsvLocation::Remote(url) => fetch_text(url).await?,
            CsvLocation::Local(path) => read_local(path).await?,
        };
        parse_csv(&text).map_err(|e| LandmarkMapError::Decode(e.to_string()))
    }
}

/// ローカルCSVを読む。読めない・UTF-8でない場合は解析失敗として扱う
async fn read_local(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LandmarkMapError::FileNotFound(path.display().to_string()),
        _ => LandmarkMapError::Decode(format!("{}: {}", path.display(), e)),
    })?;
    String::from_utf8(bytes)
        .map_err(|e| LandmarkMapError::Decode(format!("{}: UTF-8ではありません: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_url_default_gid() {
        let source = CsvSource::remote("https://docs.google.com/spreadsheets/d", "abc", None);
        assert_eq!(
            source.location(),
            &CsvLocation::Remote(
                "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=0".into()
            )
        );
    }

    #[test]
    fn test_remote_url_with_gid() {
        let source = CsvSource::remote("http://h/", "abc", Some("12345"));
        assert_eq!(source.describe(), "http://h/abc/export?format=csv&gid=12345");
    }
}
