//! Input loading: read an OpenITI file into a [`Document`].
//!
//! The first line must carry the OpenITI marker. Every rule downstream
//! assumes mARkdown, so a file without the marker is rejected before any
//! line is processed. The reader lives only inside [`load_document`] and is
//! closed on every return path, including the marker failure.

use crate::error::Mark2TxtError;
use crate::pipeline::line::{RawLine, DOCUMENT_MARKER};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An OpenITI document: the lines following the marker line, in file order.
#[derive(Debug, Clone)]
pub struct Document {
    source: PathBuf,
    lines: Vec<RawLine>,
}

impl Document {
    /// Build a document from in-memory text. `source` is only used in
    /// diagnostics and to derive artifact paths.
    pub fn parse(source: impl Into<PathBuf>, text: &str) -> Result<Self, Mark2TxtError> {
        let source = source.into();
        let lines = text.lines().map(|l| Ok(l.to_string()));
        from_lines(source, lines)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of content lines (the marker line is not counted).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    /// Hand the lines over for processing; each is consumed once.
    pub fn into_lines(self) -> Vec<RawLine> {
        self.lines
    }
}

/// Load and validate an OpenITI file.
///
/// # Errors
/// - [`Mark2TxtError::FileNotFound`] — no regular file at `path`
/// - [`Mark2TxtError::PermissionDenied`] — the file cannot be opened for reading
/// - [`Mark2TxtError::ReadFailed`] — I/O error or invalid UTF-8 while reading
/// - [`Mark2TxtError::MissingDocumentMarker`] — the first line is not the marker
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, Mark2TxtError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
        return Err(Mark2TxtError::FileNotFound { path });
    }

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(Mark2TxtError::PermissionDenied { path });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Mark2TxtError::FileNotFound { path });
        }
        Err(e) => {
            return Err(Mark2TxtError::ReadFailed {
                path,
                line: 0,
                source: e,
            });
        }
    };

    let document = from_lines(path, BufReader::new(file).lines())?;
    debug!(
        "Loaded {} lines from {}",
        document.len(),
        document.source().display()
    );
    Ok(document)
}

fn from_lines<I>(source: PathBuf, mut lines: I) -> Result<Document, Mark2TxtError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let first = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => {
            return Err(Mark2TxtError::ReadFailed {
                path: source,
                line: 1,
                source: e,
            });
        }
        None => String::new(),
    };

    if !has_document_marker(&first) {
        return Err(Mark2TxtError::MissingDocumentMarker {
            path: source,
            marker: DOCUMENT_MARKER,
        });
    }

    let mut raw = Vec::new();
    for (idx, line) in lines.enumerate() {
        // the marker is line 1
        let number = idx + 2;
        match line {
            Ok(text) => raw.push(RawLine::new(number, text)),
            Err(e) => {
                return Err(Mark2TxtError::ReadFailed {
                    path: source,
                    line: number,
                    source: e,
                });
            }
        }
    }

    Ok(Document { source, lines: raw })
}

fn has_document_marker(first_line: &str) -> bool {
    first_line
        .trim_start_matches('\u{FEFF}')
        .trim()
        .starts_with(DOCUMENT_MARKER)
}
