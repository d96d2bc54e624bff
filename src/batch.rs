//! Sequential batch conversion.
//!
//! Files are converted one after another in the given order. A failing file
//! is logged and counted, never aborts the batch, and does not change the
//! process exit status; callers read the [`BatchSummary`] instead.

use std::fmt::{Display, Formatter};
use std::path::Path;

use tracing::error;

use crate::convert::{Options, convert_file};
use crate::error::ConvertError;
use crate::pdf::PdfRenderer;

/// Receives per-file events from [`convert_files`].
///
/// All methods default to no-ops. `index` is 1-based.
pub trait BatchProgress {
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    fn on_file_start(&self, index: usize, total: usize, input: &Path) {
        let _ = (index, total, input);
    }

    fn on_file_complete(&self, index: usize, total: usize, input: &Path, output: &Path) {
        let _ = (index, total, input, output);
    }

    fn on_file_error(&self, index: usize, total: usize, input: &Path, error: &ConvertError) {
        let _ = (index, total, input, error);
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        let _ = summary;
    }
}

pub struct NoopProgress;

impl BatchProgress for NoopProgress {}

/// Success and failure counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Conversion complete. Successful: {}, Failed: {}",
            self.successful, self.failed
        )
    }
}

/// Convert every input in order and count the outcomes.
pub fn convert_files<P: AsRef<Path>>(
    inputs: &[P],
    options: &Options,
    renderer: &dyn PdfRenderer,
    progress: &dyn BatchProgress,
) -> BatchSummary {
    let total = inputs.len();
    let mut summary = BatchSummary::default();
    progress.on_batch_start(total);

    for (index, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        let index = index + 1;
        progress.on_file_start(index, total, input);

        match convert_file(input, options, renderer) {
            Ok(output) => {
                summary.successful += 1;
                progress.on_file_complete(index, total, input, &output);
            }
            Err(err) => {
                error!("Error processing {}: {}", input.display(), err);
                summary.failed += 1;
                progress.on_file_error(index, total, input, &err);
            }
        }
    }

    progress.on_batch_complete(&summary);
    summary
}
