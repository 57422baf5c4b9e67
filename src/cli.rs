use crate::config::{Config, Protocol};
use crate::logging::LogFormat;
use clap::{Args, Parser, Subcommand};
use landmark_map_common::Locale;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landmark-map")]
#[command(about = "名所スプレッドシートを地図ページに変換するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/landmark-map/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ログ形式 (pretty/compact/json)
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// ログをファイルに追記
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// 取得元の指定（設定ファイルの値を上書き）
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// スプレッドシートID
    #[arg(long)]
    pub source_id: Option<String>,

    /// タブ名（クエリプロトコル・ローカル表計算ファイル）
    #[arg(long)]
    pub sheet: Option<String>,

    /// タブID（CSVエクスポート）
    #[arg(long)]
    pub gid: Option<String>,

    /// 取得プロトコル (gviz/csv)
    #[arg(long, value_enum)]
    pub protocol: Option<Protocol>,

    /// ローカルファイル（csv/xlsx/xls/ods）から読み込む
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 旧形式の座標（";" 区切り・小数点カンマ）も受け付ける
    #[arg(long)]
    pub legacy_coords: bool,

    /// 範囲外の座標（|緯度|>90, |経度|>180）を配置しない
    #[arg(long)]
    pub validate_range: bool,
}

impl SourceArgs {
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(id) = &self.source_id {
            config.source_id = Some(id.clone());
        }
        if let Some(sheet) = &self.sheet {
            config.sub_sheet_name = Some(sheet.clone());
        }
        if let Some(gid) = &self.gid {
            config.sub_sheet_id = Some(gid.clone());
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if self.legacy_coords {
            config.legacy_coordinates = true;
        }
        if self.validate_range {
            config.validate_range = true;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 取得・正規化して地図ページ等を出力
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// 出力形式 (html/geojson/excel/json/all)
        #[arg(long, default_value = "html")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ページタイトル
        #[arg(short, long, default_value = "Карта достопримечательностей")]
        title: String,

        /// ポップアップの言語 (ru/en)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// 正規化済みレコードをJSONで出力（配置できない行も含む）
    Records {
        #[command(flatten)]
        source: SourceArgs,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 名称・国・種類で検索
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// 検索語
        query: Option<String>,

        /// 標準入力から1行ずつ検索語を読む
        #[arg(short, long)]
        interactive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// スプレッドシートIDを設定
        #[arg(long)]
        set_source_id: Option<String>,

        /// タブ名を設定
        #[arg(long)]
        set_sheet: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    Geojson,
    Excel,
    Json,
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "geojson" => Ok(ExportFormat::Geojson),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!(
                "Unknown format: {}. Use html, geojson, excel, json, or all",
                s
            )),
        }
    }
}
