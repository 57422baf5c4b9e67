//! 表計算ファイル（xlsx/xls/ods）の読み込み
//!
//! タブ名の指定がなければ先頭のタブを読む。1行目が見出し。

use super::TabularSource;
use crate::error::{LandmarkMapError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use landmark_map_common::{format_number, rows_from_table, RawRow};
use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
    sheet_name: Option<String>,
}

impl XlsxSource {
    pub fn new(path: &Path, sheet_name: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            sheet_name,
        }
    }

    /// 拡張子が表計算ファイルか
    pub fn supports(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

impl TabularSource for XlsxSource {
    fn describe(&self) -> String {
        match &self.sheet_name {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        if !self.path.exists() {
            return Err(LandmarkMapError::FileNotFound(self.path.display().to_string()));
        }

        let path = self.path.clone();
        let sheet_name = self.sheet_name.clone();
        tokio::task::spawn_blocking(move || read_workbook(&path, sheet_name.as_deref()))
            .await
            .map_err(|e| LandmarkMapError::Decode(format!("読み込みタスクエラー: {}", e)))?
    }
}

fn read_workbook(path: &Path, sheet_name: Option<&str>) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| LandmarkMapError::Decode(format!("{}: {}", path.display(), e)))?;

    let sheet = match sheet_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LandmarkMapError::Decode(format!("シートがありません: {}", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| LandmarkMapError::Decode(format!("シート '{}' を読めません: {}", sheet, e)))?;

    let mut grid = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers: Vec<String> = match grid.next() {
        Some(header_row) => header_row.into_iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows_from_table(&headers, grid))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_extensions() {
        assert!(XlsxSource::supports(Path::new("a.xlsx")));
        assert!(XlsxSource::supports(Path::new("a.ODS")));
        assert!(!XlsxSource::supports(Path::new("a.csv")));
        assert!(!XlsxSource::supports(Path::new("noext")));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(330.0)), "330");
        assert_eq!(cell_to_string(&Data::Float(48.85)), "48.85");
        assert_eq!(cell_to_string(&Data::String("Париж".into())), "Париж");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
    }
}
