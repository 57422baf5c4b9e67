//! 表データ取得アダプタ
//!
//! 取得元の形式ごとに `TabularSource` を実装し、設定から1つを選ぶ。
//! 再試行はせず、1回の読み込みで1回だけ取得する。

mod csv;
mod query;
mod xlsx;

pub use self::csv::{CsvLocation, CsvSource};
pub use self::query::QuerySource;
pub use self::xlsx::XlsxSource;

use crate::config::{Config, Protocol};
use crate::error::{LandmarkMapError, Result};
use landmark_map_common::RawRow;
use std::path::Path;
use tracing::debug;

/// 表データの取得元
#[allow(async_fn_in_trait)]
pub trait TabularSource {
    /// ログ・エラー表示用の説明
    fn describe(&self) -> String;

    /// 全行を取得
    async fn fetch_rows(&self) -> Result<Vec<RawRow>>;
}

/// 設定で選ばれた取得元
#[derive(Debug, Clone)]
pub enum Source {
    Query(QuerySource),
    Csv(CsvSource),
    Xlsx(XlsxSource),
}

impl Source {
    /// 設定とローカルファイル指定から取得元を決める
    ///
    /// ローカルファイルが指定されていれば拡張子で CSV / 表計算ファイルを選ぶ。
    /// なければ設定のプロトコルでネットワーク取得する。
    pub fn from_config(config: &Config, local_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = local_file {
            return Ok(if XlsxSource::supports(path) {
                Source::Xlsx(XlsxSource::new(path, config.sub_sheet_name.clone()))
            } else {
                Source::Csv(CsvSource::local(path))
            });
        }

        let source_id = config.require_source_id()?;
        let source = match config.protocol {
            Protocol::Query => Source::Query(QuerySource::new(
                &config.base_url,
                source_id,
                config.sub_sheet_name.clone(),
            )),
            Protocol::Csv => Source::Csv(CsvSource::remote(
                &config.base_url,
                source_id,
                config.sub_sheet_id.as_deref(),
            )),
        };
        Ok(source)
    }
}

impl TabularSource for Source {
    fn describe(&self) -> String {
        match self {
            Source::Query(s) => s.describe(),
            Source::Csv(s) => s.describe(),
            Source::Xlsx(s) => s.describe(),
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        match self {
            Source::Query(s) => s.fetch_rows().await,
            Source::Csv(s) => s.fetch_rows().await,
            Source::Xlsx(s) => s.fetch_rows().await,
        }
    }
}

/// URLの本文をテキストで取得
///
/// 通信エラーと非成功ステータスは取得失敗として返す。
pub(crate) async fn fetch_text(url: &str) -> Result<String> {
    debug!(url, "取得開始");

    let client = reqwest::Client::builder()
        .user_agent(concat!("landmark-map/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LandmarkMapError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LandmarkMapError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LandmarkMapError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let text = response.text().await.map_err(|e| LandmarkMapError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    debug!(url, bytes = text.len(), "取得完了");
    Ok(text)
}
