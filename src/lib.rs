//! # mdtopdf
//!
//! Batch Markdown to PDF conversion: comrak renders the Markdown to HTML
//! with syntect-highlighted code blocks and heading anchors, an optional
//! table of contents is prepended, and an external engine (`wkhtmltopdf`)
//! turns the assembled document into a PDF next to the source file.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use mdtopdf::{NoopProgress, Options, Wkhtmltopdf, convert_files};
//!
//! let engine = Wkhtmltopdf::locate(Wkhtmltopdf::DEFAULT_PROGRAM).expect("wkhtmltopdf");
//! let options = Options { include_toc: true };
//! let summary = convert_files(&["README.md", "CHANGELOG.md"], &options, &engine, &NoopProgress);
//! println!("{summary}");
//! ```
//!
//! ## Lower-level API
//!
//! The HTML stage can be used without any PDF engine:
//!
//! ```rust
//! use mdtopdf::{Options, assemble_html};
//!
//! let html = assemble_html("# Title\n\nSome *text*.", "doc", &Options { include_toc: true })
//!     .unwrap();
//! assert!(html.contains("<a href=\"#title\">Title</a>"));
//! ```

pub mod abbr;
pub mod batch;
pub mod convert;
pub mod error;
pub mod frontmatter;
pub mod highlight;
pub mod markdown;
pub mod pdf;
pub mod template;
pub mod toc;

pub use batch::{BatchProgress, BatchSummary, NoopProgress, convert_files};
pub use convert::{Options, assemble_html, convert_file, output_path};
pub use error::{ConvertError, PdfError};
pub use frontmatter::{FrontMatter, FrontMatterError, ParsedMarkdown, split_frontmatter};
pub use markdown::render_markdown;
pub use pdf::{PdfRenderer, Wkhtmltopdf};
pub use template::{Page, compose_document};
pub use toc::{TocEntry, collect_headings, generate_toc};
