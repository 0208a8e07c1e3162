//! Error types for the mark2txt library.
//!
//! Every variant of [`Mark2TxtError`] is **fatal**: the document cannot be
//! converted at all (missing input, missing sentence model, a file that is not
//! an OpenITI text, an output file that cannot be written). There is no
//! partial-result mode; either both artifacts are produced or neither is.
//!
//! Irregular markup and empty sentence spans are *not* errors. The cleaning
//! rules pass unknown tokens through unchanged and the segmentation stage
//! drops empty spans silently, so neither ever surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mark2txt library.
#[derive(Debug, Error)]
pub enum Mark2TxtError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is a regular file.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was opened but reading a line failed (I/O error, invalid UTF-8).
    #[error("Failed to read '{path}' at line {line}: {source}")]
    ReadFailed {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The first line does not carry the OpenITI document marker.
    #[error("The file '{path}' does not start with the expected line '{marker}'")]
    MissingDocumentMarker { path: PathBuf, marker: &'static str },

    // ── Sentence model errors ─────────────────────────────────────────────
    /// The sentence model file does not exist or cannot be opened.
    #[error("Sentence model not found: '{path}'\nPass --model <PATH> or set MARK2TXT_MODEL.")]
    ModelNotFound { path: PathBuf },

    /// The sentence model file was read but is not a usable model.
    #[error("Invalid sentence model '{path}': {detail}")]
    InvalidModel { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write one of the output files.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
