//! # mark2txt
//!
//! Strip OpenITI mARkdown from a text and split the result into sentences.
//!
//! OpenITI texts encode structure inline: `# ` opens a paragraph, `~~`
//! continues one, `### |` marks headers, `### $` biographies, `PageV01P001`
//! page breaks, `%~%` hemistichs. This crate removes that markup and
//! produces two artifacts next to the input:
//!
//! - `<input>.plain` — plain text, one paragraph per line
//! - `<input>.sent`  — one sentence per line
//!
//! ## Pipeline Overview
//!
//! ```text
//! OpenITI file
//!  │
//!  ├─ 1. Input     check the `######OpenITI#` marker line
//!  ├─ 2. Classify  valid? begins / continues a paragraph? (raw text)
//!  ├─ 3. Clean     15 ordered substitution rules
//!  ├─ 4. Assemble  dividers and joiners between cleaned lines
//!  └─ 5. Segment   split paragraphs, ask the sentence segmenter for spans
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mark2txt::{convert_to_files, ConversionConfig, RuleBasedSegmenter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let segmenter =
//!         RuleBasedSegmenter::from_model_file("resources/sentence-models/ar-sent.json")?;
//!     let config = ConversionConfig::default();
//!     let written = convert_to_files("0001AbuTalib.Diwan.JK007501-ara1", &segmenter, &config)?;
//!     eprintln!("{} sentences → {}", written.stats.sentences, written.sentence_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mark2txt` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_MODEL_PATH};
pub use convert::{convert, convert_text, convert_to_files};
pub use error::Mark2TxtError;
pub use output::{ConversionOutput, ConversionStats, WrittenArtifacts};
pub use pipeline::input::{load_document, Document};
pub use pipeline::line::{ClassifiedLine, CleanedLine, LineClass, RawLine};
pub use pipeline::model::{RuleBasedSegmenter, SentenceModel};
pub use pipeline::rules::{clean_line, PatternRule, PatternRuleSet};
pub use pipeline::segment::{SentenceSegmenter, Span};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
