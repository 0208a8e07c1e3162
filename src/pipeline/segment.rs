//! Sentence segmentation: split the plain text into sentences.
//!
//! Boundary detection itself is delegated to a [`SentenceSegmenter`]. This
//! module owns the contract around it:
//!
//! 1. split the plain text on the paragraph divider, keeping order;
//! 2. call the segmenter once per paragraph;
//! 3. keep a span only if it is non-empty and lies inside the paragraph on
//!    char boundaries, and discard anything else without failing;
//! 4. emit sentences in paragraph order, then span order.
//!
//! The segmenter is passed in by the caller, so tests can use a stub.

use crate::config::ConversionConfig;
use crate::pipeline::rules::PARAGRAPH_DIVIDER;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A sentence as `[start, end)` byte offsets into its paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The spanned text, or `None` if the span is empty or does not fit `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.is_empty() {
            return None;
        }
        text.get(self.start..self.end)
    }
}

/// Sentence-boundary capability.
pub trait SentenceSegmenter {
    /// Return the sentence spans of `paragraph`, in text order.
    fn sentence_spans(&self, paragraph: &str) -> Vec<Span>;
}

/// Split plain text into paragraphs on the divider.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(PARAGRAPH_DIVIDER)
}

/// Result of the segmentation stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub sentences: Vec<String>,
    /// Non-empty paragraphs.
    pub paragraphs: usize,
    /// Spans dropped for being empty or out of bounds.
    pub discarded_spans: usize,
}

/// Run `segmenter` over every paragraph of `text`.
pub fn collect_sentences(
    text: &str,
    segmenter: &dyn SentenceSegmenter,
    config: &ConversionConfig,
) -> Segmentation {
    let interval = config.progress_interval.max(1);
    // the split before a leading divider is empty; it is still offered to
    // the segmenter but is not counted as a paragraph
    let paragraph_count = paragraphs(text).filter(|p| !p.is_empty()).count();
    debug!("Identifying sentences in {} paragraphs", paragraph_count);
    if let Some(ref cb) = config.progress_callback {
        cb.on_segmentation_start(paragraph_count);
    }

    let mut out = Segmentation {
        paragraphs: paragraph_count,
        ..Segmentation::default()
    };

    for paragraph in paragraphs(text) {
        for span in segmenter.sentence_spans(paragraph) {
            match span.slice(paragraph) {
                Some(sentence) => {
                    out.sentences.push(sentence.to_string());
                    let n = out.sentences.len();
                    if n % interval == 0 {
                        debug!("Collected sentence {}", n);
                        if let Some(ref cb) = config.progress_callback {
                            cb.on_sentences_collected(n);
                        }
                    }
                }
                None => {
                    debug!(
                        "Discarding span {}..{} (paragraph is {} bytes)",
                        span.start,
                        span.end,
                        paragraph.len()
                    );
                    out.discarded_spans += 1;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns fixed spans regardless of the paragraph.
    struct FixedSpans(Vec<Span>);

    impl SentenceSegmenter for FixedSpans {
        fn sentence_spans(&self, _paragraph: &str) -> Vec<Span> {
            self.0.clone()
        }
    }

    /// One sentence per paragraph, covering all of it.
    struct WholeParagraph;

    impl SentenceSegmenter for WholeParagraph {
        fn sentence_spans(&self, paragraph: &str) -> Vec<Span> {
            vec![Span::new(0, paragraph.len())]
        }
    }

    #[test]
    fn empty_spans_are_discarded() {
        let seg = FixedSpans(vec![Span::new(0, 3), Span::new(3, 3), Span::new(5, 2)]);
        let out = collect_sentences("abcdef", &seg, &ConversionConfig::default());
        assert_eq!(out.sentences, vec!["abc"]);
        assert_eq!(out.discarded_spans, 2);
    }

    #[test]
    fn out_of_bounds_spans_are_discarded() {
        let seg = FixedSpans(vec![Span::new(0, 100)]);
        let out = collect_sentences("short", &seg, &ConversionConfig::default());
        assert!(out.sentences.is_empty());
        assert_eq!(out.discarded_spans, 1);
    }

    #[test]
    fn spans_off_char_boundaries_are_discarded() {
        // "قال" is 6 bytes; 1 falls inside the first letter
        let seg = FixedSpans(vec![Span::new(1, 6), Span::new(0, 6)]);
        let out = collect_sentences("قال", &seg, &ConversionConfig::default());
        assert_eq!(out.sentences, vec!["قال"]);
        assert_eq!(out.discarded_spans, 1);
    }

    #[test]
    fn paragraph_order_is_preserved() {
        let out = collect_sentences(
            "\nfirst para\nsecond para\nthird",
            &WholeParagraph,
            &ConversionConfig::default(),
        );
        assert_eq!(out.paragraphs, 3);
        // the empty leading paragraph yields an empty span, which is dropped
        assert_eq!(out.sentences, vec!["first para", "second para", "third"]);
        assert_eq!(out.discarded_spans, 1);
    }

    #[test]
    fn span_order_within_paragraph_is_preserved() {
        let seg = FixedSpans(vec![Span::new(0, 1), Span::new(1, 2), Span::new(2, 3)]);
        let out = collect_sentences("abc\nxyz", &seg, &ConversionConfig::default());
        assert_eq!(out.sentences, vec!["a", "b", "c", "x", "y", "z"]);
    }

    #[test]
    fn span_slice_bounds() {
        assert_eq!(Span::new(0, 2).slice("abc"), Some("ab"));
        assert_eq!(Span::new(2, 2).slice("abc"), None);
        assert_eq!(Span::new(1, 4).slice("abc"), None);
        assert!(Span::new(3, 1).is_empty());
    }
}
