//! Rule-based sentence segmenter driven by a JSON sentence model.
//!
//! The model file names the characters that end a sentence, the closing
//! punctuation that may trail them, and the abbreviations whose final `.`
//! never ends a sentence:
//!
//! ```json
//! {
//!   "language": "ar",
//!   "terminators": [".", "!", "?", "؟", "…"],
//!   "closing_punctuation": ["\"", ")", "»"],
//!   "abbreviations": ["ت", "هـ"]
//! }
//! ```
//!
//! A boundary is placed after a run of terminators (and any closing
//! punctuation) when the run is followed by whitespace or the end of the
//! paragraph, so `3.5` and `a.b` stay inside their sentence.

use crate::error::Mark2TxtError;
use crate::pipeline::segment::{SentenceSegmenter, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// On-disk sentence model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceModel {
    #[serde(default)]
    pub language: Option<String>,
    pub terminators: Vec<char>,
    #[serde(default)]
    pub closing_punctuation: Vec<char>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

impl SentenceModel {
    /// Built-in Arabic model, identical to `resources/sentence-models/ar-sent.json`.
    pub fn arabic() -> Self {
        Self {
            language: Some("ar".into()),
            terminators: vec!['.', '!', '?', '؟', '…'],
            closing_punctuation: vec!['"', '\'', ')', ']', '»', '”', '’'],
            abbreviations: ["ت", "هـ", "ه", "م", "ج", "ص", "ق", "ح"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Parse and validate a model from JSON text. `path` is used in errors.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, Mark2TxtError> {
        let model: SentenceModel =
            serde_json::from_str(json).map_err(|e| Mark2TxtError::InvalidModel {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        if model.terminators.is_empty() {
            return Err(Mark2TxtError::InvalidModel {
                path: path.to_path_buf(),
                detail: "model lists no sentence terminators".into(),
            });
        }
        if let Some(c) = model.terminators.iter().find(|c| c.is_whitespace()) {
            return Err(Mark2TxtError::InvalidModel {
                path: path.to_path_buf(),
                detail: format!("whitespace terminator {:?} is not allowed", c),
            });
        }
        Ok(model)
    }

    /// Read a model file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Mark2TxtError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Mark2TxtError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path).map_err(|e| Mark2TxtError::InvalidModel {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json(&json, path)
    }
}

/// [`SentenceSegmenter`] implementation backed by a [`SentenceModel`].
#[derive(Debug, Clone)]
pub struct RuleBasedSegmenter {
    terminators: HashSet<char>,
    closers: HashSet<char>,
    abbreviations: HashSet<String>,
}

impl RuleBasedSegmenter {
    pub fn new(model: &SentenceModel) -> Self {
        Self {
            terminators: model.terminators.iter().copied().collect(),
            closers: model.closing_punctuation.iter().copied().collect(),
            abbreviations: model.abbreviations.iter().cloned().collect(),
        }
    }

    /// Load the model at `path` once and build a segmenter from it.
    pub fn from_model_file(path: impl AsRef<Path>) -> Result<Self, Mark2TxtError> {
        let path = path.as_ref();
        let model = SentenceModel::load(path)?;
        info!(
            "Loaded sentence model {} ({} terminators, {} abbreviations)",
            path.display(),
            model.terminators.len(),
            model.abbreviations.len()
        );
        Ok(Self::new(&model))
    }

    /// Whether the word ending right before a `.` is a known abbreviation.
    /// A detached ` . ` (left by a dictionary marker) never is.
    fn ends_with_abbreviation(&self, before: &str) -> bool {
        if before.ends_with(char::is_whitespace) {
            return false;
        }
        let Some(word) = before.split_whitespace().last() else {
            return false;
        };
        let word = word.trim_start_matches(|c: char| self.closers.contains(&c) || c == '(');
        self.abbreviations.contains(word)
    }
}

impl SentenceSegmenter for RuleBasedSegmenter {
    fn sentence_spans(&self, paragraph: &str) -> Vec<Span> {
        let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
        let mut spans = Vec::new();
        let mut start: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];
            let Some(s) = start else {
                if !ch.is_whitespace() {
                    start = Some(pos);
                } else {
                    i += 1;
                }
                continue;
            };

            if !self.terminators.contains(&ch) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len()
                && (self.terminators.contains(&chars[j].1) || self.closers.contains(&chars[j].1))
            {
                j += 1;
            }

            let followed_by_space = chars.get(j).map_or(true, |(_, c)| c.is_whitespace());
            let abbreviation = ch == '.' && self.ends_with_abbreviation(&paragraph[s..pos]);
            if followed_by_space && !abbreviation {
                let end = chars.get(j).map_or(paragraph.len(), |(p, _)| *p);
                spans.push(Span::new(s, end));
                start = None;
            }
            i = j;
        }

        if let Some(s) = start {
            let end = s + paragraph[s..].trim_end().len();
            if end > s {
                spans.push(Span::new(s, end));
            }
        }

        spans
    }
}
