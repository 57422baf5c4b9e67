//! Landmark Map Common Library
//!
//! 表データの正規化・座標解決・ポップアップ生成など、
//! ネットワークに依存しない共通処理

pub mod types;
pub mod alias;
pub mod coords;
pub mod error;
pub mod export;
pub mod normalizer;
pub mod parser;
pub mod popup;
pub mod search;
pub mod session;

pub use types::{CanonicalRecord, Coordinate, Marker, RawRow};
pub use alias::{AliasTable, Field, HeaderIndex, DEFAULT_ALIASES};
pub use coords::{derive_map_url, map_search_url, parse_coordinate, parse_coordinate_with, CoordinateOptions, PLACEHOLDER_URL};
pub use error::{Error, Result};
pub use normalizer::{normalize, Normalizer};
pub use parser::{extract_json_object, format_number, parse_csv, parse_query_response, rows_from_table};
pub use popup::{escape_html, render_popup, Locale, PopupLabels};
pub use search::SearchIndex;
pub use session::{build_session, MapSession};
