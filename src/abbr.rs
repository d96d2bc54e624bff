//! Abbreviation definitions (`*[HTML]: Hyper Text Markup Language`).
//!
//! Definition lines are removed from the source before parsing; every
//! whole-word occurrence of a defined abbreviation in body text is then
//! wrapped in `<abbr title="...">`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static RE_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}\*\[([^\]]+)\]:[ \t]*(.*?)\s*$").unwrap());

#[derive(Debug, Default)]
pub struct Abbreviations {
    titles: HashMap<String, String>,
    pattern: Option<Regex>,
}

impl Abbreviations {
    /// Split `markdown` into the source without definition lines and the
    /// definitions found. Lines inside fenced code blocks are left alone.
    /// A later definition of the same abbreviation wins.
    pub fn extract(markdown: &str) -> (String, Self) {
        let mut body = String::with_capacity(markdown.len());
        let mut titles = HashMap::new();
        let mut fence: Option<&str> = None;

        for line in markdown.lines() {
            let trimmed = line.trim_start();
            let marker = ["```", "~~~"]
                .into_iter()
                .find(|m| trimmed.starts_with(m));

            match (fence, marker) {
                (Some(open), Some(close)) if open == close => fence = None,
                (None, Some(open)) => fence = Some(open),
                _ => {}
            }

            if fence.is_none()
                && marker.is_none()
                && let Some(caps) = RE_DEFINITION.captures(line)
            {
                let name = caps[1].trim().to_string();
                if !name.is_empty() {
                    titles.insert(name, caps[2].to_string());
                    continue;
                }
            }

            body.push_str(line);
            body.push('\n');
        }

        (body, Self::new(titles))
    }

    fn new(titles: HashMap<String, String>) -> Self {
        if titles.is_empty() {
            return Self::default();
        }

        let mut names: Vec<&String> = titles.keys().collect();
        // Longest first so "HTML5" is preferred over "HTML".
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{alternation})\b")).ok();

        Self { titles, pattern }
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// HTML for `text` with abbreviations wrapped, or `None` when nothing
    /// in `text` matches.
    pub fn wrap(&self, text: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        if !pattern.is_match(text) {
            return None;
        }

        let mut html = String::with_capacity(text.len() + 32);
        let mut last = 0;
        for found in pattern.find_iter(text) {
            html.push_str(&escape_html(&text[last..found.start()]));
            let title = self
                .titles
                .get(found.as_str())
                .map(String::as_str)
                .unwrap_or_default();
            html.push_str(&format!(
                "<abbr title=\"{}\">{}</abbr>",
                escape_html(title),
                escape_html(found.as_str())
            ));
            last = found.end();
        }
        html.push_str(&escape_html(&text[last..]));
        Some(html)
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
