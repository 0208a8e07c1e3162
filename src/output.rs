//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a conversion produces, held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Markup-free text; paragraphs separated by `\n`.
    pub plain_text: String,
    /// Sentences in paragraph order, then span order.
    pub sentences: Vec<String>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// The sentence artifact: one sentence per line.
    pub fn sentence_text(&self) -> String {
        let mut out = String::with_capacity(self.sentences.iter().map(|s| s.len() + 1).sum());
        for sentence in &self.sentences {
            out.push_str(sentence);
            out.push('\n');
        }
        out
    }
}

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Lines after the document marker.
    pub total_lines: usize,
    /// Blank and metadata lines dropped.
    pub skipped_lines: usize,
    pub paragraph_begins: usize,
    pub continuations: usize,
    /// Non-empty paragraphs in the plain text.
    pub paragraphs: usize,
    pub sentences: usize,
    /// Segmenter spans dropped for being empty or out of bounds.
    pub discarded_spans: usize,
    pub duration_ms: u64,
}

/// Where [`crate::convert_to_files`] wrote its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenArtifacts {
    pub plain_path: PathBuf,
    pub sentence_path: PathBuf,
    pub stats: ConversionStats,
}
