//! ポップアップHTML生成
//!
//! 表データは誰でも編集できる入力なので、埋め込む値は全てエスケープする。

use crate::types::CanonicalRecord;
use serde::{Deserialize, Serialize};

/// ポップアップの表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// 表示ラベル
#[derive(Debug, Clone, Copy)]
pub struct PopupLabels {
    pub untitled: &'static str,
    pub height: &'static str,
    pub description: &'static str,
    pub myths: &'static str,
    pub visa: &'static str,
    pub open_map: &'static str,
    pub open_images: &'static str,
}

impl Locale {
    pub fn labels(&self) -> PopupLabels {
        match self {
            Locale::Ru => PopupLabels {
                untitled: "Без названия",
                height: "Высота/размер:",
                description: "Описание:",
                myths: "Мифы и легенды:",
                visa: "Визы (UA):",
                open_map: "Открыть в Google Maps ↗",
                open_images: "Открыть фото (Google Images) ↗",
            },
            Locale::En => PopupLabels {
                untitled: "No title",
                height: "Height/size:",
                description: "Description:",
                myths: "Myths & legends:",
                visa: "Visa (UA):",
                open_map: "Open in Google Maps ↗",
                open_images: "Open photos ↗",
            },
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" | "russian" => Ok(Locale::Ru),
            "en" | "english" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}. Use ru or en", s)),
        }
    }
}

/// テキスト用エスケープ（& < >）
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// 属性値用エスケープ（引用符も含む）
pub fn escape_attr(value: &str) -> String {
    escape_html(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// リンクとして出力してよいURLか（http/https のみ）
fn is_linkable(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn link_row(url: &str, text: &str) -> String {
    if !is_linkable(url) {
        return String::new();
    }
    format!(
        r#"<div class="row"><a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
        escape_attr(url.trim()),
        escape_html(text)
    )
}

fn text_row(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="row"><strong>{}</strong> {}</div>"#,
        escape_html(label),
        escape_html(value)
    )
}

/// メタ行（国 · 種類 · 年）: 空の項目は省く
pub fn meta_line(record: &CanonicalRecord) -> String {
    [&record.country, &record.kind, &record.years]
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(" · ")
}

/// ポップアップHTMLを生成
pub fn render_popup(record: &CanonicalRecord, labels: &PopupLabels) -> String {
    let title = if record.title.is_empty() {
        labels.untitled
    } else {
        record.title.as_str()
    };

    let mut html = String::new();
    html.push_str(r#"<div class="popup">"#);
    html.push_str(&format!("<h3>{}</h3>", escape_html(title)));
    html.push_str(&format!(
        r#"<div class="meta">{}</div>"#,
        escape_html(&meta_line(record))
    ));
    html.push_str(&text_row(labels.height, &record.height));
    html.push_str(&text_row(labels.description, &record.description));
    html.push_str(&text_row(labels.myths, &record.myths));
    if !record.visa.is_empty() {
        html.push_str(&format!(
            r#"<div class="row"><span class="badge">{} {}</span></div>"#,
            escape_html(labels.visa),
            escape_html(&record.visa)
        ));
    }
    html.push_str(&link_row(&record.map_url, labels.open_map));
    html.push_str(&link_row(&record.images_url, labels.open_images));
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("A & B"), "A &amp; B");
        assert_eq!(escape_html("Москва"), "Москва");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr(r#"x" onclick="y"#), "x&quot; onclick=&quot;y");
    }

    #[test]
    fn test_popup_escapes_title() {
        let record = CanonicalRecord {
            title: "<script>alert(1)</script>".into(),
            map_url: "#".into(),
            ..Default::default()
        };
        let html = render_popup(&record, &Locale::Ru.labels());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_popup_title_fallback() {
        let record = CanonicalRecord {
            map_url: "#".into(),
            ..Default::default()
        };
        assert!(render_popup(&record, &Locale::Ru.labels()).contains("<h3>Без названия</h3>"));
        assert!(render_popup(&record, &Locale::En.labels()).contains("<h3>No title</h3>"));
    }

    #[test]
    fn test_meta_line_skips_empty_parts() {
        let record = CanonicalRecord {
            country: "Франция".into(),
            years: "1889".into(),
            ..Default::default()
        };
        assert_eq!(meta_line(&record), "Франция · 1889");
        assert_eq!(meta_line(&CanonicalRecord::default()), "");
    }

    #[test]
    fn test_popup_conditional_rows() {
        let record = CanonicalRecord {
            title: "T".into(),
            height: "100 м".into(),
            visa: "Безвиз".into(),
            map_url: "#".into(),
            ..Default::default()
        };
        let html = render_popup(&record, &Locale::Ru.labels());
        assert!(html.contains("Высота/размер:"));
        assert!(html.contains(r#"<span class="badge">Визы (UA): Безвиз</span>"#));
        assert!(!html.contains("Описание:"));
        assert!(!html.contains("Мифы и легенды:"));
        // プレースホルダのリンクは出さない
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_popup_rejects_non_http_links() {
        let record = CanonicalRecord {
            map_url: "#".into(),
            images_url: "javascript:alert(1)".into(),
            ..Default::default()
        };
        let html = render_popup(&record, &Locale::Ru.labels());
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_popup_links() {
        let record = CanonicalRecord {
            map_url: "https://www.google.com/maps/search/?api=1&query=1,2".into(),
            images_url: "https://images.example/?q=a&b".into(),
            ..Default::default()
        };
        let html = render_popup(&record, &Locale::Ru.labels());
        assert!(html.contains(r#"href="https://www.google.com/maps/search/?api=1&amp;query=1,2""#));
        assert!(html.contains("Открыть фото (Google Images) ↗"));
    }
}
