//! Per-line structural classification.
//!
//! A line is classified from its **raw** text: the cleaning rules rewrite or
//! delete the very markers tested here, so classifying cleaned text would
//! always answer "no". The types make the order explicit:
//!
//! ```text
//! RawLine ──classify()──▶ ClassifiedLine ──clean(rules)──▶ CleanedLine
//! ```
//!
//! [`LineClass`] can only be obtained from a [`RawLine`], and cleaning
//! consumes the [`ClassifiedLine`], so there is no way to classify text that
//! has already been through the rule set.

use crate::pipeline::rules::PatternRuleSet;

/// Leading marker of an OpenITI document (first line).
pub const DOCUMENT_MARKER: &str = "######OpenITI#";

/// Lines starting with this marker belong to the metadata block.
pub const METADATA_MARKER: &str = "#META#";

/// Lead character of the paragraph-begin marker (`# ` or `# %`).
pub const PARAGRAPH_BEGIN_MARKER: char = '#';

/// Marker of a line that continues the current paragraph.
pub const PARAGRAPH_CONTINUATION_MARKER: &str = "~~";

/// One line of a document, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    number: usize,
    text: String,
}

impl RawLine {
    /// `number` is the 1-based position in the source file.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Phase 1: classify the untouched line.
    pub fn classify(self) -> ClassifiedLine {
        let class = LineClass::of(&self.text);
        ClassifiedLine { line: self, class }
    }
}

/// Structural facts about a raw line. The three flags are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    is_valid: bool,
    begins_paragraph: bool,
    continues_paragraph: bool,
}

impl LineClass {
    fn of(raw: &str) -> Self {
        Self {
            is_valid: is_valid(raw),
            begins_paragraph: begins_paragraph(raw),
            continues_paragraph: raw.starts_with(PARAGRAPH_CONTINUATION_MARKER),
        }
    }

    /// False for blank lines and metadata lines; such lines are dropped.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn begins_paragraph(&self) -> bool {
        self.begins_paragraph
    }

    pub fn continues_paragraph(&self) -> bool {
        self.continues_paragraph
    }
}

fn is_valid(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && !trimmed.starts_with(METADATA_MARKER)
}

/// `#` followed by whitespace or end of line. The verse form `# %` is
/// covered because its `#` is followed by a space; structural markers such as
/// `### |` or `#####SUBJ#CODE#` are not, since a second `#` follows.
fn begins_paragraph(raw: &str) -> bool {
    match raw.strip_prefix(PARAGRAPH_BEGIN_MARKER) {
        Some(rest) => rest.chars().next().map_or(true, char::is_whitespace),
        None => false,
    }
}

/// A raw line together with its classification, ready to be cleaned.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    line: RawLine,
    class: LineClass,
}

impl ClassifiedLine {
    pub fn class(&self) -> LineClass {
        self.class
    }

    pub fn number(&self) -> usize {
        self.line.number
    }

    /// Phase 2: run the rule set over the raw text.
    pub fn clean(self, rules: &PatternRuleSet) -> CleanedLine {
        CleanedLine {
            number: self.line.number,
            class: self.class,
            text: rules.clean(&self.line.text),
        }
    }
}

/// The output of both phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedLine {
    number: usize,
    class: LineClass,
    text: String,
}

impl CleanedLine {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn class(&self) -> LineClass {
        self.class
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
