use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PdfError;

/// Turns a complete HTML document into a PDF file at `output`.
///
/// An existing file at `output` is overwritten. On failure the engine may
/// leave a partial file behind.
pub trait PdfRenderer {
    fn render(&self, html: &str, output: &Path) -> Result<(), PdfError>;
}

/// The `wkhtmltopdf` command-line engine.
///
/// The document is streamed on stdin, so no intermediate HTML file is
/// written.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
}

impl Wkhtmltopdf {
    pub const DEFAULT_PROGRAM: &'static str = "wkhtmltopdf";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that `program` can be started by running `<program> -V`.
    ///
    /// Only a failure to spawn counts; the exit status of the version probe
    /// is ignored.
    pub fn locate(program: impl Into<PathBuf>) -> Result<Self, PdfError> {
        let engine = Self::new(program);
        let probe = Command::new(&engine.program)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| engine.spawn_error(source))?;

        let version = String::from_utf8_lossy(&probe.stdout);
        debug!(
            "Found {}: {}",
            engine.program.display(),
            version.trim()
        );
        Ok(engine)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn_error(&self, source: io::Error) -> PdfError {
        let program = self.program.display().to_string();
        if source.kind() == io::ErrorKind::NotFound {
            PdfError::NotFound { program }
        } else {
            PdfError::Spawn { program, source }
        }
    }
}

impl Default for Wkhtmltopdf {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl PdfRenderer for Wkhtmltopdf {
    fn render(&self, html: &str, output: &Path) -> Result<(), PdfError> {
        debug!(
            "Running {} for {} ({} bytes of HTML)",
            self.program.display(),
            output.display(),
            html.len()
        );

        let mut child = Command::new(&self.program)
            .args(["--quiet", "--encoding", "utf-8", "-"])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        // Dropping stdin closes the pipe so the engine sees end of input.
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(html.as_bytes()),
            None => Err(io::Error::other("engine stdin was not captured")),
        };

        let result = child.wait_with_output().map_err(PdfError::Wait)?;
        if !result.status.success() {
            return Err(PdfError::Failed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        sent.map_err(PdfError::Stdin)
    }
}
