//! Error types shared across quizdeck crates.
//!
//! `LoadError` lives here rather than in `quizdeck-loader` so the
//! `BankSource` trait can name it and callers can match on the cause
//! without string inspection.

use thiserror::Error;

use crate::model::Label;

/// Errors raised by an in-progress quiz session or the status store.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A selection named a question position outside the session.
    #[error("no question at position {index} (session has {len})")]
    NoSuchQuestion { index: usize, len: usize },

    /// A selection named a label the question does not display.
    #[error("question {index} has no option {label}")]
    NoSuchOption { index: usize, label: Label },

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The status map could not be encoded.
    #[error("failed to encode status map: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from a key/value storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid key/value document.
    #[error("storage file {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },
}

/// Errors that can occur while fetching a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The page path has no entry in the topic table.
    #[error("no question bank is registered for page {0}")]
    UnknownPage(String),

    /// The server answered with a non-success status.
    #[error("fetching {url} failed (HTTP {status})")]
    HttpStatus { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The bank file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The response body is not JSON.
    #[error("question bank is not valid JSON: {0}")]
    Parse(String),
}

impl LoadError {
    /// Returns `true` if the failure came from the transport rather than the data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoadError::HttpStatus { .. } | LoadError::Timeout(_) | LoadError::Network(_)
        )
    }
}
