use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

use comrak::adapters::{HeadingAdapter, HeadingMeta};
use comrak::html::Anchorizer;
use comrak::nodes::{AstNode, NodeValue, Sourcepos};
use comrak::plugins::syntect::SyntectAdapter;
use comrak::{Arena, Options, Plugins, format_html_with_plugins, parse_document};

use crate::abbr::Abbreviations;
use crate::error::ConvertError;
use crate::highlight::THEME;

static HIGHLIGHTER: OnceLock<SyntectAdapter> = OnceLock::new();

fn highlighter() -> &'static SyntectAdapter {
    HIGHLIGHTER.get_or_init(|| SyntectAdapter::new(Some(THEME)))
}

/// Render Markdown to an HTML fragment.
///
/// Tables, footnotes, description lists, abbreviations, strikethrough, task
/// lists and autolinks are enabled. Code blocks are highlighted with inline
/// styles so the fragment needs no external stylesheet, and every heading
/// gets an `id` derived from its text, made unique within the document.
pub fn render_markdown(markdown: &str) -> Result<String, ConvertError> {
    let (source, abbreviations) = Abbreviations::extract(markdown);

    let mut options = Options::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.render.unsafe_ = true;

    let headings = HeadingIds::default();

    let mut plugins = Plugins::default();
    plugins.render.codefence_syntax_highlighter = Some(highlighter());
    plugins.render.heading_adapter = Some(&headings);

    let arena = Arena::new();
    let root = parse_document(&arena, &source, &options);
    if !abbreviations.is_empty() {
        expand_abbreviations(root, &abbreviations);
    }

    let mut html = Vec::with_capacity(source.len() * 2);
    format_html_with_plugins(root, &options, &mut html, &plugins).map_err(ConvertError::Render)?;
    String::from_utf8(html)
        .map_err(|e| ConvertError::Render(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Replace text nodes containing abbreviations with inline HTML.
///
/// Headings are skipped: their text feeds the anchor ids.
fn expand_abbreviations<'a>(root: &'a AstNode<'a>, abbreviations: &Abbreviations) {
    let texts: Vec<_> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Text(_)))
        .filter(|node| {
            !node
                .ancestors()
                .any(|a| matches!(a.data.borrow().value, NodeValue::Heading(_)))
        })
        .collect();

    for node in texts {
        let mut data = node.data.borrow_mut();
        let NodeValue::Text(ref text) = data.value else {
            continue;
        };
        if let Some(html) = abbreviations.wrap(text) {
            data.value = NodeValue::HtmlInline(html);
        }
    }
}

/// Writes `<hN id="...">` with ids from comrak's anchorizer.
///
/// One instance per document: the anchorizer remembers ids already handed
/// out and suffixes repeats with `-1`, `-2`, ...
#[derive(Default)]
struct HeadingIds {
    anchorizer: Mutex<Anchorizer>,
}

impl HeadingAdapter for HeadingIds {
    fn enter(
        &self,
        output: &mut dyn Write,
        heading: &HeadingMeta,
        _sourcepos: Option<Sourcepos>,
    ) -> io::Result<()> {
        let id = self
            .anchorizer
            .lock()
            .map_err(|_| io::Error::other("heading anchorizer poisoned"))?
            .anchorize(heading.content.clone());
        write!(output, "<h{} id=\"{}\">", heading.level, id)
    }

    fn exit(&self, output: &mut dyn Write, heading: &HeadingMeta) -> io::Result<()> {
        writeln!(output, "</h{}>", heading.level)
    }
}
