//! CLI binary for mark2txt.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, loads the sentence model and writes both artifacts.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mark2txt::{
    convert_to_files, ConversionConfig, ConversionProgressCallback, ProgressCallback,
    RuleBasedSegmenter, DEFAULT_MODEL_PATH,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr showing how far the run has got.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Loading");
        bar.set_message("reading file…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_lines: usize) {
        self.bar.set_prefix("Cleaning");
        self.bar.set_message(format!("0/{total_lines} lines"));
    }

    fn on_lines_processed(&self, lines: usize) {
        self.bar.set_message(format!("line {lines}"));
    }

    fn on_segmentation_start(&self, paragraphs: usize) {
        self.bar.set_prefix("Segmenting");
        self.bar.set_message(format!("{paragraphs} paragraphs"));
    }

    fn on_sentences_collected(&self, sentences: usize) {
        self.bar.set_message(format!("sentence {sentences}"));
    }

    fn on_conversion_complete(&self, _lines: usize, _sentences: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert an OpenITI text (writes FILE.plain and FILE.sent)
  mark2txt -f 0001AbuTalibCabdManaf.Diwan.JK007501-ara1

  # Use another sentence model
  mark2txt -f book-ara1 --model models/ar-sent.json

  # Machine-readable run summary
  mark2txt -f book-ara1 --json

ENVIRONMENT VARIABLES:
  MARK2TXT_MODEL          Path to the JSON sentence model
  RUST_LOG                Override the log filter (e.g. mark2txt=debug)
"#;

/// Strip OpenITI mARkdown into plain text and one sentence per line.
#[derive(Parser, Debug)]
#[command(
    name = "mark2txt",
    version,
    about = "Strip OpenITI mARkdown into plain text and one sentence per line",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file in OpenITI mARkdown.
    #[arg(short = 'f', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// JSON sentence model.
    #[arg(long, env = "MARK2TXT_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Suffix of the plain-text output file.
    #[arg(long, env = "MARK2TXT_PLAIN_SUFFIX", default_value = ".plain")]
    plain_suffix: String,

    /// Suffix of the sentence output file.
    #[arg(long, env = "MARK2TXT_SENT_SUFFIX", default_value = ".sent")]
    sent_suffix: String,

    /// Report progress every N lines / sentences.
    #[arg(long, env = "MARK2TXT_PROGRESS_INTERVAL", default_value_t = 50,
          value_parser = clap::value_parser!(u64).range(1..))]
    progress_interval: u64,

    /// Print the run summary as JSON on stdout.
    #[arg(long, env = "MARK2TXT_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "MARK2TXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MARK2TXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MARK2TXT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.verbose;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Validate input path ──────────────────────────────────────────────
    if !cli.input.is_file() {
        anyhow::bail!("I cannot read the file at {}", cli.input.display());
    }

    // ── Load the sentence model once ─────────────────────────────────────
    let segmenter = RuleBasedSegmenter::from_model_file(&cli.model)
        .context("Failed to load sentence model")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .plain_suffix(cli.plain_suffix.clone())
        .sentence_suffix(cli.sent_suffix.clone())
        .progress_interval(cli.progress_interval as usize);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let written = convert_to_files(&cli.input, &segmenter, &config)
        .with_context(|| format!("Conversion of {} failed", cli.input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&written).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        eprintln!("Plain text file saved to {}", written.plain_path.display());
        eprintln!("Sentences file saved to {}", written.sentence_path.display());
        eprintln!(
            "   {} lines  /  {} paragraphs  /  {} sentences  —  {}ms",
            written.stats.total_lines,
            written.stats.paragraphs,
            written.stats.sentences,
            written.stats.duration_ms,
        );
    }

    Ok(())
}
