//! Table of contents built from rendered HTML.
//!
//! Only `<h1>`–`<h3>` are listed. The generator works on the HTML fragment
//! rather than the Markdown source, so headings written as raw HTML are
//! picked up too.

use once_cell::sync::Lazy;
use regex::Regex;

pub const TOC_HEADING: &str = "Table of Contents";

static RE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-3])(\s[^>]*)?>(.*?)</h[1-3]\s*>").unwrap());

static RE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// One heading found in the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    /// Value of the `id` attribute, empty when the heading has none.
    pub id: String,
    /// Heading content with markup removed.
    pub text: String,
}

/// Collect level 1–3 headings in document order.
pub fn collect_headings(html: &str) -> Vec<TocEntry> {
    RE_HEADING
        .captures_iter(html)
        .map(|caps| {
            let level = caps[1].parse().unwrap_or(1);
            let id = caps
                .get(2)
                .and_then(|attrs| RE_ID.captures(attrs.as_str()))
                .and_then(|id| id.get(1).or_else(|| id.get(2)))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let text = RE_TAG.replace_all(&caps[3], "").trim().to_string();
            TocEntry { level, id, text }
        })
        .collect()
}

/// Build the TOC block: a "Table of Contents" heading and one link per
/// heading. Repeated headings are listed as often as they occur.
pub fn generate_toc(html: &str) -> String {
    let mut toc = vec![
        "<nav class=\"toc\">".to_string(),
        format!("<h2>{TOC_HEADING}</h2>"),
        "<ul>".to_string(),
    ];
    for entry in collect_headings(html) {
        toc.push(format!(
            "<li class=\"toc-h{}\"><a href=\"#{}\">{}</a></li>",
            entry.level, entry.id, entry.text
        ));
    }
    toc.push("</ul>".to_string());
    toc.push("</nav>".to_string());
    toc.join("\n")
}
