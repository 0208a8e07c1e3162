//! Configuration types for mARkdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The markup rules themselves are fixed;
//! what can be configured is where the artifacts land and how often progress
//! is reported.

use crate::error::Mark2TxtError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix appended to the input path for the plain-text artifact.
pub const DEFAULT_PLAIN_SUFFIX: &str = ".plain";

/// Suffix appended to the input path for the one-sentence-per-line artifact.
pub const DEFAULT_SENTENCE_SUFFIX: &str = ".sent";

/// Default location of the sentence model, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "resources/sentence-models/ar-sent.json";

/// Configuration for a mARkdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use mark2txt::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .plain_suffix(".txt")
///     .progress_interval(100)
///     .build()
///     .unwrap();
/// assert_eq!(config.plain_suffix, ".txt");
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Suffix for the plain-text artifact. Default: `.plain`.
    pub plain_suffix: String,

    /// Suffix for the sentence artifact. Default: `.sent`.
    pub sentence_suffix: String,

    /// Report progress every N lines (and every N sentences). Default: 50.
    pub progress_interval: usize,

    /// Optional observer for progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            plain_suffix: DEFAULT_PLAIN_SUFFIX.to_string(),
            sentence_suffix: DEFAULT_SENTENCE_SUFFIX.to_string(),
            progress_interval: 50,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("plain_suffix", &self.plain_suffix)
            .field("sentence_suffix", &self.sentence_suffix)
            .field("progress_interval", &self.progress_interval)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the plain-text artifact for `input` (input path + suffix).
    pub fn plain_path(&self, input: &Path) -> PathBuf {
        with_suffix(input, &self.plain_suffix)
    }

    /// Path of the sentence artifact for `input` (input path + suffix).
    pub fn sentence_path(&self, input: &Path) -> PathBuf {
        with_suffix(input, &self.sentence_suffix)
    }
}

/// Append `suffix` to the full file name; `book.ara1` becomes `book.ara1.plain`.
fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn plain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.plain_suffix = suffix.into();
        self
    }

    pub fn sentence_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.sentence_suffix = suffix.into();
        self
    }

    pub fn progress_interval(mut self, n: usize) -> Self {
        self.config.progress_interval = n;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Mark2TxtError> {
        let c = &self.config;
        if c.plain_suffix.is_empty() || c.sentence_suffix.is_empty() {
            return Err(Mark2TxtError::InvalidConfig(
                "Output suffixes must not be empty (the input file would be overwritten)".into(),
            ));
        }
        if c.plain_suffix == c.sentence_suffix {
            return Err(Mark2TxtError::InvalidConfig(format!(
                "Plain and sentence suffixes must differ, both are '{}'",
                c.plain_suffix
            )));
        }
        if c.progress_interval == 0 {
            return Err(Mark2TxtError::InvalidConfig(
                "Progress interval must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_suffixes_and_interval() {
        let c = ConversionConfig::default();
        assert_eq!(c.plain_suffix, ".plain");
        assert_eq!(c.sentence_suffix, ".sent");
        assert_eq!(c.progress_interval, 50);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn artifact_paths_append_to_full_name() {
        let c = ConversionConfig::default();
        let input = Path::new("/data/0001AbuTalib.Diwan.JK007501-ara1");
        assert_eq!(
            c.plain_path(input),
            PathBuf::from("/data/0001AbuTalib.Diwan.JK007501-ara1.plain")
        );
        assert_eq!(
            c.sentence_path(input),
            PathBuf::from("/data/0001AbuTalib.Diwan.JK007501-ara1.sent")
        );
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = ConversionConfig::builder().plain_suffix("").build().unwrap_err();
        assert!(matches!(err, Mark2TxtError::InvalidConfig(_)));
    }

    #[test]
    fn identical_suffixes_rejected() {
        let err = ConversionConfig::builder()
            .plain_suffix(".out")
            .sentence_suffix(".out")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains(".out"));
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(ConversionConfig::builder().progress_interval(0).build().is_err());
    }

    #[test]
    fn debug_hides_callback() {
        let c = ConversionConfig::builder()
            .progress_callback(std::sync::Arc::new(crate::progress::NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn ConversionProgressCallback>"));
    }
}
