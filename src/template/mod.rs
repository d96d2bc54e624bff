const STYLESHEET: &str = include_str!("style.css");

/// Pieces of the final HTML document.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    pub lang: &'a str,
    /// Stylesheet of the code highlighting theme, appended after the base rules.
    pub highlight_css: &'a str,
    /// Table of contents block, or empty.
    pub toc: &'a str,
    pub body: &'a str,
}

/// Wrap a rendered fragment into a standalone HTML document: the fixed
/// stylesheet plus highlight CSS in `<head>`, then the TOC, then the body.
pub fn compose_document(page: &Page<'_>) -> String {
    let mut html = String::with_capacity(
        STYLESHEET.len() + page.highlight_css.len() + page.toc.len() + page.body.len() + 256,
    );
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n", escape_attr(page.lang)));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_text(page.title)));
    html.push_str("<style>\n");
    html.push_str(STYLESHEET);
    html.push('\n');
    html.push_str(page.highlight_css);
    html.push_str("\n</style>\n</head>\n<body>\n");
    if !page.toc.is_empty() {
        html.push_str(page.toc);
        html.push('\n');
    }
    html.push_str(page.body);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page<'a>(toc: &'a str, body: &'a str) -> Page<'a> {
        Page {
            title: "Doc",
            lang: "en",
            highlight_css: ".code { color: #323232; }",
            toc,
            body,
        }
    }

    #[test]
    fn order_is_style_toc_body() {
        let html = compose_document(&page("<nav>TOC</nav>", "<p>body</p>"));
        let style = html.find("<style>").unwrap();
        let toc = html.find("<nav>TOC</nav>").unwrap();
        let body = html.find("<p>body</p>").unwrap();
        assert!(style < toc && toc < body);
    }

    #[test]
    fn includes_base_and_highlight_css() {
        let html = compose_document(&page("", "<p>x</p>"));
        assert!(html.contains("font-family: Arial"));
        assert!(html.contains(".code { color: #323232; }"));
    }

    #[test]
    fn title_is_escaped() {
        let mut p = page("", "");
        p.title = "Q&A <draft>";
        let html = compose_document(&p);
        assert!(html.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
    }

    #[test]
    fn utf8_charset_declared() {
        let html = compose_document(&page("", "<p>ü</p>"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<html lang=\"en\">"));
    }
}
