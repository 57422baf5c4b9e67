//! クエリプロトコル取得
//!
//! `GET <base>/<id>/gviz/tq?tqx=out:json[&sheet=<name>]`
//! 応答は JSON を非JSONの前置き・後置きで包んだテキスト。

use super::{fetch_text, TabularSource};
use crate::error::{LandmarkMapError, Result};
use landmark_map_common::{parse_query_response, RawRow};

#[derive(Debug, Clone)]
pub struct QuerySource {
    url: String,
}

impl QuerySource {
    pub fn new(base_url: &str, source_id: &str, sheet_name: Option<String>) -> Self {
        let mut url = format!(
            "{}/{}/gviz/tq?tqx=out:json",
            base_url.trim_end_matches('/'),
            urlencoding::encode(source_id.trim())
        );
        if let Some(sheet) = sheet_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            url.push_str("&sheet=");
            url.push_str(&urlencoding::encode(sheet));
        }
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TabularSource for QuerySource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let body = fetch_text(&self.url).await?;
        parse_query_response(&body).map_err(|e| LandmarkMapError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_sheet() {
        let source = QuerySource::new("https://docs.google.com/spreadsheets/d/", "abc123", None);
        assert_eq!(
            source.url(),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:json"
        );
    }

    #[test]
    fn test_url_with_encoded_sheet() {
        let source = QuerySource::new("http://localhost:1", "abc", Some("Лист 1".into()));
        assert_eq!(
            source.url(),
            "http://localhost:1/abc/gviz/tq?tqx=out:json&sheet=%D0%9B%D0%B8%D1%81%D1%82%201"
        );
    }

    #[test]
    fn test_url_ignores_blank_sheet() {
        let source = QuerySource::new("http://h", "abc", Some("  ".into()));
        assert!(!source.url().contains("sheet="));
    }
}
