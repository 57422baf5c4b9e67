pub mod excel;

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::Result;
use crate::render::{render_session, GeoJsonSurface, LeafletPage};
use landmark_map_common::MapSession;
use std::path::{Path, PathBuf};

/// ファイル名に使えない文字
const INVALID_FILE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// タイトルからファイル名の語幹を作る（パス区切り等は除去）
fn file_stem_for(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter(|c| !INVALID_FILE_CHARS.contains(c) && !c.is_control())
        .collect();
    let stem = stem.trim().trim_matches('.').trim();
    if stem.is_empty() {
        "map".to_string()
    } else {
        stem.to_string()
    }
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else {
        output.to_path_buf()
    }
}

/// 全形式出力時のパス（同じ語幹で拡張子だけ変える）
fn output_path_for_all(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| file_stem_for(title));
        parent.join(format!("{}.{}", stem, extension))
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

pub fn write_html(session: &MapSession, config: &Config, path: &Path, title: &str) -> Result<()> {
    let mut page = LeafletPage::new(config, title);
    render_session(session, &mut page);
    write_text(path, &page.to_html()?)
}

pub fn write_geojson(session: &MapSession, path: &Path) -> Result<()> {
    let mut surface = GeoJsonSurface::new();
    render_session(session, &mut surface);
    write_text(path, &surface.to_string_pretty()?)
}

/// 正規化済みの全レコード（配置できなかった行も含む）
pub fn write_records_json(session: &MapSession, path: &Path) -> Result<()> {
    write_text(path, &serde_json::to_string_pretty(&session.records)?)
}

/// 出力したファイルのパスを返す
pub fn export_session(
    session: &MapSession,
    config: &Config,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    match format {
        ExportFormat::Html => {
            let path = output_path_for_format(output, title, "html");
            println!("- 地図ページを生成中...");
            write_html(session, config, &path, title)?;
            println!("✔ HTML出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Geojson => {
            let path = output_path_for_format(output, title, "geojson");
            println!("- GeoJSONを生成中...");
            write_geojson(session, &path)?;
            println!("✔ GeoJSON出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, title, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(&session.records, &path, title)?;
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Json => {
            let path = output_path_for_format(output, title, "json");
            write_records_json(session, &path)?;
            println!("✔ JSON出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::All => {
            let html_path = output_path_for_all(output, title, "html");
            let geojson_path = output_path_for_all(output, title, "geojson");
            let excel_path = output_path_for_all(output, title, "xlsx");

            println!("- 地図ページを生成中...");
            write_html(session, config, &html_path, title)?;
            println!("✔ HTML出力: {}", html_path.display());

            write_geojson(session, &geojson_path)?;
            println!("✔ GeoJSON出力: {}", geojson_path.display());

            println!("- Excelを生成中...");
            excel::generate_excel(&session.records, &excel_path, title)?;
            println!("✔ Excel出力: {}", excel_path.display());

            written.extend([html_path, geojson_path, excel_path]);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_format() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path_for_format(dir.path(), "map", "html"),
            dir.path().join("map.html")
        );
        assert_eq!(
            output_path_for_format(Path::new("out/page.htm"), "map", "html"),
            PathBuf::from("out/page.htm")
        );
    }

    #[test]
    fn test_output_path_for_all_shares_stem() {
        assert_eq!(
            output_path_for_all(Path::new("out/world.html"), "map", "xlsx"),
            PathBuf::from("out/world.xlsx")
        );
    }

    #[test]
    fn test_title_with_separators_stays_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path_for_format(dir.path(), "../etc/passwd", "html"),
            dir.path().join("etcpasswd.html")
        );
        assert_eq!(
            output_path_for_all(dir.path(), r"a\b/c", "xlsx"),
            dir.path().join("abc.xlsx")
        );
        assert_eq!(file_stem_for("Карта: мир"), "Карта мир");
        assert_eq!(file_stem_for("//"), "map");
    }
}
