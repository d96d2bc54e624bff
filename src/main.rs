use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mdtopdf::{BatchProgress, BatchSummary, ConvertError, Options, Wkhtmltopdf, convert_files};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "mdtopdf", version)]
#[command(about = "Convert Markdown files to PDF")]
struct Cli {
    #[arg(required = true, help = "Input Markdown file(s).")]
    inputs: Vec<PathBuf>,

    #[arg(short, long, help = "Include table of contents.")]
    toc: bool,

    #[arg(short, long, help = "Increase output verbosity.")]
    verbose: bool,

    #[arg(
        long,
        env = "MDTOPDF_WKHTMLTOPDF",
        default_value = Wkhtmltopdf::DEFAULT_PROGRAM,
        value_name = "PATH",
        help = "wkhtmltopdf executable to render with."
    )]
    wkhtmltopdf: PathBuf,

    #[arg(long, env = "MDTOPDF_NO_PROGRESS", help = "Disable the progress bar.")]
    no_progress: bool,
}

/// Progress bar over the batch; log lines are printed above it.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template(
            "{prefix:.bold} {percent:>3}%|{bar:40.cyan/blue}| {pos}/{len} [{elapsed_precise}<{eta_precise}] {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_prefix("Processing files");
        Self { bar }
    }

    /// Log writer that clears the bar while a line is written.
    fn log_writer(&self) -> SuspendingWriter {
        SuspendingWriter {
            bar: self.bar.clone(),
        }
    }
}

impl BatchProgress for CliProgress {
    fn on_batch_start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    fn on_file_start(&self, _index: usize, _total: usize, input: &Path) {
        self.bar.set_message(input.display().to_string());
    }

    fn on_file_complete(&self, _index: usize, _total: usize, _input: &Path, _output: &Path) {
        self.bar.inc(1);
    }

    fn on_file_error(&self, _index: usize, _total: usize, _input: &Path, _error: &ConvertError) {
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _summary: &BatchSummary) {
        self.bar.finish_and_clear();
    }
}

#[derive(Clone)]
struct SuspendingWriter {
    bar: ProgressBar,
}

impl Write for SuspendingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

fn main() {
    let cli = Cli::parse();
    let progress = CliProgress::new(!cli.no_progress);

    let log_writer = progress.log_writer();
    log_subscriber(cli.verbose, io::stderr().is_terminal(), move || {
        log_writer.clone()
    })
    .init();

    match run(&cli, &progress) {
        Ok(summary) => println!("{summary}"),
        Err(error) => {
            eprintln!("[mdtopdf] {error:#}");
            process::exit(1);
        }
    }
}

/// `RUST_LOG` wins over `-v`. Colour codes are only emitted when `ansi` is
/// set, i.e. when stderr is a terminal.
fn log_subscriber<W>(verbose: bool, ansi: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

fn run(cli: &Cli, progress: &CliProgress) -> Result<BatchSummary> {
    let engine = Wkhtmltopdf::locate(&cli.wkhtmltopdf).context("PDF engine unavailable")?;
    let options = Options {
        include_toc: cli.toc,
    };
    Ok(convert_files(&cli.inputs, &options, &engine, progress))
}
