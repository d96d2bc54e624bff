use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConvertError;
use crate::frontmatter::{ParsedMarkdown, split_frontmatter};
use crate::highlight::theme_css;
use crate::markdown::render_markdown;
use crate::pdf::PdfRenderer;
use crate::template::{Page, compose_document};
use crate::toc::generate_toc;

const DEFAULT_LANG: &str = "en";

/// Per-run conversion settings, shared by every file in a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Prepend a table of contents built from h1–h3.
    pub include_toc: bool,
}

/// Where the PDF for `input` is written: same directory, extension
/// replaced by `.pdf` (or added when there is none).
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Render Markdown source into the standalone HTML document handed to the
/// PDF engine.
///
/// `fallback_title` is used for `<title>` when the front matter has none.
pub fn assemble_html(
    markdown: &str,
    fallback_title: &str,
    options: &Options,
) -> Result<String, ConvertError> {
    let ParsedMarkdown { frontmatter, body } = split_frontmatter(markdown)?;

    let fragment = render_markdown(&body)?;
    let toc = if options.include_toc {
        generate_toc(&fragment)
    } else {
        String::new()
    };
    let highlight_css = theme_css().map_err(ConvertError::Highlight)?;

    let title = frontmatter
        .title
        .as_deref()
        .and_then(non_empty_str)
        .unwrap_or(fallback_title);
    let lang = frontmatter
        .lang
        .as_deref()
        .and_then(non_empty_str)
        .unwrap_or(DEFAULT_LANG);

    Ok(compose_document(&Page {
        title,
        lang,
        highlight_css,
        toc: &toc,
        body: &fragment,
    }))
}

/// Convert one Markdown file to a PDF next to it and return the PDF path.
pub fn convert_file(
    input: &Path,
    options: &Options,
    renderer: &dyn PdfRenderer,
) -> Result<PathBuf, ConvertError> {
    let output = output_path(input);

    let markdown = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    debug!("Read {} ({} bytes)", input.display(), markdown.len());

    let title = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let html = assemble_html(&markdown, &title, options)?;

    renderer.render(&html, &output)?;
    info!("PDF created: {}", output.display());
    Ok(output)
}

fn non_empty_str(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("a/b/report.md")),
            PathBuf::from("a/b/report.pdf")
        );
    }

    #[test]
    fn output_path_without_extension() {
        assert_eq!(output_path(Path::new("docs/README")), PathBuf::from("docs/README.pdf"));
    }

    #[test]
    fn output_path_only_replaces_last_extension() {
        assert_eq!(
            output_path(Path::new("notes.v2.markdown")),
            PathBuf::from("notes.v2.pdf")
        );
    }

    #[test]
    fn no_toc_when_disabled() {
        let html = assemble_html("# A\n\n## B\n", "doc", &Options::default()).unwrap();
        assert!(!html.contains("Table of Contents"));
    }

    #[test]
    fn toc_links_heading_anchor() {
        let options = Options { include_toc: true };
        let html = assemble_html("# Title\n\nSome *text*.", "doc", &options).unwrap();
        assert!(
            html.contains("<li class=\"toc-h1\"><a href=\"#title\">Title</a></li>"),
            "got: {html}"
        );
        assert!(html.contains("<h1 id=\"title\">Title</h1>"));
    }

    #[test]
    fn toc_precedes_body() {
        let options = Options { include_toc: true };
        let html = assemble_html("# Title\n", "doc", &options).unwrap();
        let toc = html.find("Table of Contents").unwrap();
        let heading = html.find("<h1 id=\"title\">").unwrap();
        assert!(toc < heading);
    }

    #[test]
    fn frontmatter_title_and_lang() {
        let md = "---\ntitle: Quarterly Report\nlang: fr\n---\n# Intro\n";
        let html = assemble_html(md, "report", &Options::default()).unwrap();
        assert!(html.contains("<title>Quarterly Report</title>"));
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(!html.contains("title: Quarterly Report"));
    }

    #[test]
    fn fallback_title_used_without_frontmatter() {
        let html = assemble_html("text", "report", &Options::default()).unwrap();
        assert!(html.contains("<title>report</title>"));
        assert!(html.contains("<html lang=\"en\">"));
    }

    #[test]
    fn broken_frontmatter_is_an_error() {
        let err = assemble_html("---\ntitle: x\n", "doc", &Options::default()).unwrap_err();
        assert!(matches!(err, ConvertError::FrontMatter(_)));
    }
}
