//! Error types for the conversion pipeline.
//!
//! [`ConvertError`] is the per-file failure: the batch driver logs it,
//! counts the file as failed and moves on to the next input. [`PdfError`]
//! covers the external rendering engine and is also returned on its own by
//! the startup presence check.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::frontmatter::FrontMatterError;

/// Why a single Markdown file could not be turned into a PDF.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Missing file, permission problem or invalid UTF-8.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    /// comrak failed to write the HTML fragment.
    #[error("failed to render markdown: {0}")]
    Render(#[source] std::io::Error),

    /// The highlighting theme stylesheet could not be produced.
    #[error("highlight theme: {0}")]
    Highlight(String),

    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Failures talking to the HTML-to-PDF engine.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error(
        "{program} is not installed or not in PATH.\n\
Install wkhtmltopdf: https://wkhtmltopdf.org/downloads.html\n\
or point --wkhtmltopdf / MDTOPDF_WKHTMLTOPDF at the binary."
    )]
    NotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to send document to the PDF engine: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to wait for the PDF engine: {0}")]
    Wait(#[source] std::io::Error),

    /// The engine ran but exited unsuccessfully.
    #[error("PDF engine exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}
