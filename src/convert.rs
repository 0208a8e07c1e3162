//! Conversion entry points.
//!
//! [`convert`] and [`convert_text`] run the whole pipeline in memory and
//! return a [`ConversionOutput`]. [`convert_to_files`] additionally writes the
//! `.plain` and `.sent` artifacts next to the input. Nothing is written until
//! both texts are complete, so a failed run leaves no output behind.

use crate::config::ConversionConfig;
use crate::error::Mark2TxtError;
use crate::output::{ConversionOutput, ConversionStats, WrittenArtifacts};
use crate::pipeline::assemble::assemble;
use crate::pipeline::input::{load_document, Document};
use crate::pipeline::rules::PatternRuleSet;
use crate::pipeline::segment::{collect_sentences, SentenceSegmenter};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Convert an OpenITI file to plain text and sentences.
///
/// # Errors
/// Returns `Err(Mark2TxtError)` only for fatal errors: missing or unreadable
/// input, or a first line without the OpenITI marker.
pub fn convert(
    input: impl AsRef<Path>,
    segmenter: &dyn SentenceSegmenter,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Mark2TxtError> {
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());
    let document = load_document(input)?;
    Ok(run(document, segmenter, config))
}

/// Convert OpenITI text held in memory. `source` names it in diagnostics.
pub fn convert_text(
    source: impl AsRef<Path>,
    text: &str,
    segmenter: &dyn SentenceSegmenter,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Mark2TxtError> {
    let document = Document::parse(source.as_ref(), text)?;
    Ok(run(document, segmenter, config))
}

/// Convert an OpenITI file and write `<input><plain_suffix>` and
/// `<input><sentence_suffix>`.
///
/// Both files are staged as temp files in the target directory and renamed
/// into place only after both were written completely. A directory at either
/// target path is rejected up front; if the second rename still fails, the
/// first artifact is removed again.
pub fn convert_to_files(
    input: impl AsRef<Path>,
    segmenter: &dyn SentenceSegmenter,
    config: &ConversionConfig,
) -> Result<WrittenArtifacts, Mark2TxtError> {
    let input = input.as_ref();
    let output = convert(input, segmenter, config)?;

    let plain_path = config.plain_path(input);
    let sentence_path = config.sentence_path(input);
    reject_directory(&plain_path)?;
    reject_directory(&sentence_path)?;

    let plain_tmp = stage(&plain_path, output.plain_text.as_bytes())?;
    let sentence_tmp = stage(&sentence_path, output.sentence_text().as_bytes())?;
    persist_pair(plain_tmp, &plain_path, sentence_tmp, &sentence_path)?;
    info!("Plain text file saved to {}", plain_path.display());
    info!("Sentences file saved to {}", sentence_path.display());

    Ok(WrittenArtifacts {
        plain_path,
        sentence_path,
        stats: output.stats,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn run(
    document: Document,
    segmenter: &dyn SentenceSegmenter,
    config: &ConversionConfig,
) -> ConversionOutput {
    let start = Instant::now();
    let total_lines = document.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_lines);
    }

    // ── Step 1: Plain text ───────────────────────────────────────────────
    let (plain_text, assembly) = assemble(document, PatternRuleSet::markup(), config);
    info!(
        "Assembled {} bytes of plain text from {} lines ({} skipped)",
        plain_text.len(),
        assembly.lines,
        assembly.skipped_lines
    );

    // ── Step 2: Sentences ────────────────────────────────────────────────
    let segmentation = collect_sentences(&plain_text, segmenter, config);
    info!(
        "Identified {} sentences in {} paragraphs",
        segmentation.sentences.len(),
        segmentation.paragraphs
    );

    let stats = ConversionStats {
        total_lines,
        skipped_lines: assembly.skipped_lines,
        paragraph_begins: assembly.paragraph_begins,
        continuations: assembly.continuations,
        paragraphs: segmentation.paragraphs,
        sentences: segmentation.sentences.len(),
        discarded_spans: segmentation.discarded_spans,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_lines, stats.sentences);
    }

    ConversionOutput {
        plain_text,
        sentences: segmentation.sentences,
        stats,
    }
}

/// Write `contents` to a temp file in the directory of `path`.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile, Mark2TxtError> {
    let write_failed = |source| Mark2TxtError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(contents).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    Ok(tmp)
}

/// An existing directory at an artifact path can never be replaced by a file.
fn reject_directory(path: &Path) -> Result<(), Mark2TxtError> {
    if path.is_dir() {
        return Err(Mark2TxtError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "a directory is in the way"),
        });
    }
    Ok(())
}

/// Persist both staged artifacts, or neither: if the second rename fails the
/// first artifact is removed again.
fn persist_pair(
    plain_tmp: NamedTempFile,
    plain_path: &Path,
    sentence_tmp: NamedTempFile,
    sentence_path: &Path,
) -> Result<(), Mark2TxtError> {
    persist(plain_tmp, plain_path)?;
    if let Err(e) = persist(sentence_tmp, sentence_path) {
        if let Err(cleanup) = std::fs::remove_file(plain_path) {
            warn!(
                "Could not remove {} after failed write: {}",
                plain_path.display(),
                cleanup
            );
        }
        return Err(e);
    }
    Ok(())
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<(), Mark2TxtError> {
    tmp.persist(path)
        .map_err(|e| Mark2TxtError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}
