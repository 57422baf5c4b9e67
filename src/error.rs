use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandmarkMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データソースIDが設定されていません。`landmark-map config --set-source-id ID` で設定するか --source-id を指定してください")]
    MissingSourceId,

    #[error("データ取得に失敗: {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("データ取得に失敗: {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("データの解析に失敗: {0}")]
    Decode(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] landmark_map_common::Error),
}

impl LandmarkMapError {
    /// 読み込み全体を中断するエラー（取得・解析）か
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            LandmarkMapError::Fetch { .. }
                | LandmarkMapError::HttpStatus { .. }
                | LandmarkMapError::Decode(_)
                | LandmarkMapError::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LandmarkMapError>;
