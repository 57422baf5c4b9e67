//! landmark-map
//!
//! スプレッドシート（またはローカルの表ファイル）から名所一覧を取得し、
//! 正規化・座標解決してマーカー付きの地図ページを出力する。

pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod source;
