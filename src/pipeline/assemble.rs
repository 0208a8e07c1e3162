//! Paragraph assembly: turn the classified, cleaned line stream into one
//! plain-text blob.
//!
//! For every line, in file order:
//!
//! ```text
//! invalid            → dropped, contributes nothing
//! begins paragraph   → divider  + cleaned text
//! continues paragraph→ joiner   + cleaned text
//! otherwise          → (joiner) + cleaned text
//! ```
//!
//! A bare content line (neither marker) gets a joiner only when the buffer
//! already holds text that does not end in a separator, so the last word of
//! one line is never glued to the first word of the next. Dividers are only
//! ever written by the begin branch, so the finished text holds exactly one
//! divider per paragraph-begin line.

use crate::config::ConversionConfig;
use crate::pipeline::input::Document;
use crate::pipeline::line::{CleanedLine, RawLine};
use crate::pipeline::rules::{PatternRuleSet, CONTINUATION_JOINER, PARAGRAPH_DIVIDER};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counters collected while assembling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Lines seen after the document marker.
    pub lines: usize,
    /// Blank and metadata lines that were dropped.
    pub skipped_lines: usize,
    /// Lines that opened a paragraph.
    pub paragraph_begins: usize,
    /// Lines that continued a paragraph.
    pub continuations: usize,
}

/// The accumulating plain text. Only grows.
#[derive(Debug, Default)]
pub struct ParagraphBuffer {
    text: String,
}

impl ParagraphBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_divider(&mut self) {
        self.text.push(PARAGRAPH_DIVIDER);
    }

    pub fn push_joiner(&mut self) {
        self.text.push(CONTINUATION_JOINER);
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// True when a bare line may be appended without a joiner.
    fn at_boundary(&self) -> bool {
        self.text.is_empty() || self.text.ends_with([PARAGRAPH_DIVIDER, CONTINUATION_JOINER])
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> String {
        self.text
    }
}

/// Drives classification and cleaning over a line stream.
pub struct ParagraphAssembler<'r> {
    rules: &'r PatternRuleSet,
    buffer: ParagraphBuffer,
    stats: AssemblyStats,
    progress_interval: usize,
    progress: Option<ProgressCallback>,
}

impl<'r> ParagraphAssembler<'r> {
    pub fn new(rules: &'r PatternRuleSet, config: &ConversionConfig) -> Self {
        Self {
            rules,
            buffer: ParagraphBuffer::new(),
            stats: AssemblyStats::default(),
            progress_interval: config.progress_interval.max(1),
            progress: config.progress_callback.clone(),
        }
    }

    /// Classify, clean and append one line.
    pub fn push_line(&mut self, line: RawLine) {
        self.stats.lines += 1;
        self.report_progress();

        let classified = line.classify();
        if !classified.class().is_valid() {
            self.stats.skipped_lines += 1;
            return;
        }

        let cleaned = classified.clean(self.rules);
        self.append(&cleaned);
    }

    fn append(&mut self, line: &CleanedLine) {
        let class = line.class();
        if class.begins_paragraph() {
            self.stats.paragraph_begins += 1;
            self.buffer.push_divider();
        } else if class.continues_paragraph() {
            self.stats.continuations += 1;
            self.buffer.push_joiner();
        } else if !line.text().is_empty() && !self.buffer.at_boundary() {
            self.buffer.push_joiner();
        }
        self.buffer.push_text(line.text());
    }

    fn report_progress(&self) {
        let n = self.stats.lines;
        if n % self.progress_interval == 0 {
            debug!("Processing line {}", n);
            if let Some(ref cb) = self.progress {
                cb.on_lines_processed(n);
            }
        }
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// Finalise the buffer into the plain text.
    pub fn finish(self) -> (String, AssemblyStats) {
        (self.buffer.finish(), self.stats)
    }
}

/// Assemble the plain text of a whole document.
pub fn assemble(
    document: Document,
    rules: &PatternRuleSet,
    config: &ConversionConfig,
) -> (String, AssemblyStats) {
    let mut assembler = ParagraphAssembler::new(rules, config);
    for line in document.into_lines() {
        assembler.push_line(line);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ConversionProgressCallback;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn plain(body: &str) -> (String, AssemblyStats) {
        let doc = Document::parse("test", &format!("######OpenITI#\n{body}")).unwrap();
        assemble(doc, PatternRuleSet::markup(), &ConversionConfig::default())
    }

    #[test]
    fn begin_line_starts_with_divider() {
        let (text, stats) = plain("# first paragraph text\n");
        assert_eq!(text, "\nfirst paragraph text");
        assert_eq!(stats.paragraph_begins, 1);
    }

    #[test]
    fn continuation_joins_with_single_space() {
        let (text, stats) = plain("# prior content\n~~continued text\n");
        assert_eq!(text, "\nprior content continued text");
        assert_eq!(stats.continuations, 1);
    }

    #[test]
    fn invalid_lines_contribute_nothing() {
        let with = plain("# one\n   \n#META# meta\n\n~~two\n").0;
        let without = plain("# one\n~~two\n").0;
        assert_eq!(with, without);
    }

    #[test]
    fn whitespace_only_document_is_empty() {
        let (text, stats) = plain("   \n\t\n");
        assert_eq!(text, "");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.skipped_lines, 2);
    }

    #[test]
    fn bare_lines_are_not_glued() {
        let (text, _) = plain("# para one\n### | Chapter\n#####AAA#BBB# some content\n");
        assert_eq!(text, "\npara one Chapter some content");
    }

    #[test]
    fn glued_hash_is_stripped_but_does_not_open_paragraph() {
        let (text, stats) = plain("# one\n#text\n");
        assert_eq!(text, "\none text");
        assert_eq!(stats.paragraph_begins, 1);
    }

    #[test]
    fn bare_line_after_divider_gets_no_joiner() {
        let (text, _) = plain("#\nPageV01P001 words\n");
        assert_eq!(text, "\nwords");
    }

    #[test]
    fn divider_count_equals_begin_lines() {
        let body = "### | Title\n# one\n~~one more\n# two PageV01P002\n# % verse %~% line\n\n~~tail\n";
        let (text, stats) = plain(body);
        let dividers = text.matches(PARAGRAPH_DIVIDER).count();
        assert_eq!(dividers, stats.paragraph_begins);
        assert_eq!(dividers, 3);
    }

    #[test]
    fn buffer_only_grows() {
        let mut buf = ParagraphBuffer::new();
        buf.push_text("a");
        let before = buf.as_str().len();
        buf.push_joiner();
        buf.push_divider();
        assert!(buf.as_str().len() > before);
        assert_eq!(buf.finish(), "a \n");
    }

    #[test]
    fn progress_reported_every_interval() {
        struct Ticks(AtomicUsize);
        impl ConversionProgressCallback for Ticks {
            fn on_lines_processed(&self, _lines: usize) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let ticks = Arc::new(Ticks(AtomicUsize::new(0)));
        let config = ConversionConfig::builder()
            .progress_interval(2)
            .progress_callback(ticks.clone())
            .build()
            .unwrap();
        let doc = Document::parse("t", "######OpenITI#\n# a\n# b\n# c\n# d\n# e\n").unwrap();
        let (_, stats) = assemble(doc, PatternRuleSet::markup(), &config);
        assert_eq!(stats.lines, 5);
        assert_eq!(ticks.0.load(Ordering::SeqCst), 2);
    }
}
