//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline walks the document. Progress is purely
//! observational: no callback can alter the output.
//!
//! # Example
//!
//! ```rust
//! use mark2txt::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct LineCounter {
//!     seen: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for LineCounter {
//!     fn on_lines_processed(&self, lines: usize) {
//!         self.seen.store(lines, Ordering::SeqCst);
//!         eprintln!("Processing line {lines}");
//!     }
//! }
//!
//! let counter = Arc::new(LineCounter { seen: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline while it processes a document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The pipeline is single-threaded, but the trait is
/// `Send + Sync` so a callback can be shared with a progress-bar thread.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document was loaded and validated.
    ///
    /// # Arguments
    /// * `total_lines` — number of lines after the document marker
    fn on_conversion_start(&self, total_lines: usize) {
        let _ = total_lines;
    }

    /// Called every `progress_interval` lines while assembling plain text.
    fn on_lines_processed(&self, lines: usize) {
        let _ = lines;
    }

    /// Called once the plain text is assembled, before sentence segmentation.
    ///
    /// # Arguments
    /// * `paragraphs` — number of non-empty paragraphs
    fn on_segmentation_start(&self, paragraphs: usize) {
        let _ = paragraphs;
    }

    /// Called every `progress_interval` sentences while collecting sentences.
    fn on_sentences_collected(&self, sentences: usize) {
        let _ = sentences;
    }

    /// Called once after both stages completed.
    ///
    /// # Arguments
    /// * `lines`     — lines processed (valid or not)
    /// * `sentences` — sentences in the final list
    fn on_conversion_complete(&self, lines: usize, sentences: usize) {
        let _ = (lines, sentences);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
