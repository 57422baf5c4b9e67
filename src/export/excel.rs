//! 監査用Excel出力（CLI版）
//!
//! 生成は共通ライブラリ、ここではファイルへの書き出しだけを行う。

use crate::error::{LandmarkMapError, Result};
use landmark_map_common::export::excel_core::generate_audit_buffer;
use landmark_map_common::CanonicalRecord;
use std::path::Path;

/// Excelのシート名に使えない文字
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

pub fn generate_excel(records: &[CanonicalRecord], output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_audit_buffer(records, &sheet_name_for(title))
        .map_err(LandmarkMapError::Export)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}

/// タイトルからシート名を作る（31文字まで、禁止文字は除去）
fn sheet_name_for(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| !INVALID_SHEET_CHARS.contains(c))
        .take(31)
        .collect();
    let name = name.trim().trim_matches('\'').to_string();
    if name.is_empty() {
        "records".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_for() {
        assert_eq!(sheet_name_for("Карта"), "Карта");
        assert_eq!(sheet_name_for("a/b:c"), "abc");
        assert_eq!(sheet_name_for("[]"), "records");
        assert_eq!(sheet_name_for(&"x".repeat(40)).chars().count(), 31);
    }
}
