//! Error type shared by the fallible record operations.
//!
//! Lookups (`get`, `resolve`, `bind`) report misses with `Option` so callers can
//! fold them into a default; mutations and file I/O return [`PropError`].

use std::path::PathBuf;

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PropError {
    /// A path segment did not resolve to an existing entry
    #[error("path not found: {path}")]
    NotFound { path: String },

    /// The node addressed by a path is a leaf where a mapping or sequence was required
    #[error("not a mapping or sequence at: {path}")]
    NotAContainer { path: String },

    /// Delimiters must contain at least one character
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PropError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        PropError::NotFound { path: path.into() }
    }

    pub(crate) fn not_a_container(path: impl Into<String>) -> Self {
        PropError::NotAContainer { path: path.into() }
    }

    /// Check if this error means the path did not lead to a writable slot:
    /// a missing entry, or a leaf where a mapping or sequence was required
    pub fn is_not_found(&self) -> bool {
        matches!(self, PropError::NotFound { .. } | PropError::NotAContainer { .. })
    }

    /// Check if this error came from reading or parsing a document
    pub fn is_input_error(&self) -> bool {
        matches!(self, PropError::Io { .. } | PropError::Json { .. })
    }
}
