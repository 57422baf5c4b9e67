//! 監査用Excel生成（共通ライブラリ）
//!
//! 取得した全レコードを1行ずつ出力する。座標を解決できなかった行も残し、
//! 配置状況の列で区別する。

use crate::types::CanonicalRecord;
use rust_xlsxwriter::*;

/// 列定義（見出し, 幅）
const COLUMNS: &[(&str, f64)] = &[
    ("row", 6.0),
    ("placed", 8.0),
    ("title", 28.0),
    ("country", 16.0),
    ("type", 16.0),
    ("years", 12.0),
    ("height", 14.0),
    ("description", 40.0),
    ("myths", 30.0),
    ("coordsRaw", 22.0),
    ("lat", 12.0),
    ("lng", 12.0),
    ("mapUrl", 40.0),
    ("imagesUrl", 40.0),
    ("visa", 16.0),
];

/// 監査用Excelをバッファに生成
///
/// # Arguments
/// * `records` - 正規化済みレコード（取得順）
/// * `sheet_name` - シート名
pub fn generate_audit_buffer(records: &[CanonicalRecord], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xE8E8E8))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap();

    let unplaced_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_font_color(Color::RGB(0xB00020));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (label, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let placed = record.resolved_coordinate.is_some();

        worksheet
            .write_number(row, 0, (i + 1) as f64)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(
                row,
                1,
                if placed { "yes" } else { "no" },
                if placed { &text_format } else { &unplaced_format },
            )
            .map_err(|e| format!("値書き込みエラー: {}", e))?;

        let texts = [
            &record.title,
            &record.country,
            &record.kind,
            &record.years,
            &record.height,
            &record.description,
            &record.myths,
            &record.coords_raw,
        ];
        for (offset, value) in texts.iter().enumerate() {
            worksheet
                .write_string_with_format(row, 2 + offset as u16, value.as_str(), &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        if let Some(c) = record.resolved_coordinate {
            worksheet
                .write_number(row, 10, c.lat)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            worksheet
                .write_number(row, 11, c.lng)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        let tail = [&record.map_url, &record.images_url, &record.visa];
        for (offset, value) in tail.iter().enumerate() {
            worksheet
                .write_string_with_format(row, 12 + offset as u16, value.as_str(), &text_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    if !records.is_empty() {
        worksheet
            .autofilter(0, 0, records.len() as u32, (COLUMNS.len() - 1) as u16)
            .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    #[test]
    fn test_audit_buffer_is_xlsx() {
        let records = vec![
            CanonicalRecord {
                title: "Эйфелева башня".into(),
                coords_raw: "48.8,2.3".into(),
                resolved_coordinate: Some(Coordinate::new(48.8, 2.3)),
                map_url: "https://www.google.com/maps/search/?api=1&query=48.8,2.3".into(),
                ..Default::default()
            },
            CanonicalRecord {
                title: "Нигде".into(),
                map_url: "#".into(),
                ..Default::default()
            },
        ];
        let buffer = generate_audit_buffer(&records, "records").unwrap();
        // xlsx は zip
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_audit_buffer_empty_records() {
        let buffer = generate_audit_buffer(&[], "records").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_audit_buffer_invalid_sheet_name() {
        assert!(generate_audit_buffer(&[], "bad/name[]").is_err());
    }
}
