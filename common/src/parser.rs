//! 取得データのパーサー
//!
//! - クエリプロトコル応答: 前後の非JSON文字列に包まれたJSONを抽出し、
//!   列定義と行セルから RawRow を組み立てる
//! - CSV: 1行目を見出しとして RawRow に変換する

use crate::error::{Error, Result};
use crate::types::RawRow;
use serde::Deserialize;
use serde_json::Value;

/// 応答テキストからJSONオブジェクト部分を抽出
///
/// 最初の `{` から最後の `}` までを返す。
///
/// # Examples
/// ```
/// use landmark_map_common::extract_json_object;
///
/// let body = "/*O_o*/\ngoogle.visualization.Query.setResponse({\"status\":\"ok\"});";
/// assert_eq!(extract_json_object(body).unwrap(), "{\"status\":\"ok\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    let start = response.find('{');
    let end = response.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if end > start => Ok(&response[start..=end]),
        _ => Err(Error::Parse("JSONオブジェクトが見つかりません".into())),
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    table: QueryTable,
}

#[derive(Debug, Default, Deserialize)]
struct QueryTable {
    #[serde(default)]
    cols: Vec<QueryColumn>,
    #[serde(default)]
    rows: Vec<Option<QueryRow>>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryColumn {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryRow {
    #[serde(default)]
    c: Option<Vec<Option<QueryCell>>>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryCell {
    #[serde(default)]
    v: Value,
}

impl QueryColumn {
    fn header(&self) -> String {
        let label = self.label.as_deref().map(str::trim).unwrap_or("");
        if !label.is_empty() {
            return label.to_string();
        }
        self.id.as_deref().map(str::trim).unwrap_or("").to_string()
    }
}

/// 列番号（0始まり）から見出しがない列のキーを作る
pub fn positional_key(index: usize) -> String {
    format!("col_{}", index + 1)
}

/// セル値を文字列化（整数値の数値は小数点なし）
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
            }
        }
        other => other.to_string(),
    }
}

/// 浮動小数点数を表示用に整形（1.0 → "1"）
pub fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// クエリプロトコル応答を RawRow 列に変換
///
/// 全セルが空の行は捨てる。
pub fn parse_query_response(response: &str) -> Result<Vec<RawRow>> {
    let json = extract_json_object(response)?;
    let parsed: QueryResponse = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("応答JSONパースエラー: {}", e)))?;

    let headers: Vec<String> = parsed.table.cols.iter().map(QueryColumn::header).collect();

    let rows = parsed
        .table
        .rows
        .into_iter()
        .flatten()
        .filter_map(|row| row.c)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| {
                    cell.as_ref()
                        .map(|c| cell_to_string(&c.v).trim().to_string())
                        .unwrap_or_default()
                })
                .collect::<Vec<String>>()
        })
        .filter(|values| values.iter().any(|v| !v.is_empty()))
        .map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (header_at(&headers, i), value))
                .collect::<RawRow>()
        })
        .collect();

    Ok(rows)
}

fn header_at(headers: &[String], index: usize) -> String {
    match headers.get(index) {
        Some(h) if !h.is_empty() => h.clone(),
        _ => positional_key(index),
    }
}

/// CSVテキストを RawRow 列に変換
///
/// 1行目が見出し。空行と全セルが空の行は読み飛ばす。
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    Ok(rows_from_table(&headers, records))
}

/// 見出し行とデータ行から RawRow 列を作る
///
/// 全セルが空の行は読み飛ばす。短い行は空文字列で埋め、
/// 見出しより多いセルは `col_<n>` キーにする。
pub fn rows_from_table<I>(headers: &[String], records: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<String>>,
{
    records
        .into_iter()
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|cells| {
            let width = headers.len().max(cells.len());
            (0..width)
                .map(|i| (header_at(headers, i), cells.get(i).cloned().unwrap_or_default()))
                .collect::<RawRow>()
        })
        .collect()
}
