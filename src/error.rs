//! Error types for the panbench library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PanbenchError`] enum. The taxonomy separates fatal configuration
//! mistakes from the per-item conditions the evaluation pipeline recovers
//! from (an unreadable query document, a timed-out backend call, a dropped
//! ingestion batch).

use std::io;

use thiserror::Error;

/// The main error type for panbench operations.
#[derive(Error, Debug)]
pub enum PanbenchError {
    /// I/O errors (file operations, corpus traversal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (unknown strategy selector, invalid cutoffs).
    /// These abort the run: they signal a programming or config mistake,
    /// not a runtime condition.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search backend errors (connection refused, malformed response)
    #[error("Backend error: {0}")]
    Backend(String),

    /// A backend call exceeded its wall-clock deadline
    #[error("Search timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Text analysis errors (tokenization, lexicon loading)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PanbenchError.
pub type Result<T> = std::result::Result<T, PanbenchError>;

impl PanbenchError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PanbenchError::Config(msg.into())
    }

    /// Create a new backend error.
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        PanbenchError::Backend(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PanbenchError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PanbenchError::Other(msg.into())
    }

    /// Whether this error is recoverable at item granularity.
    ///
    /// Recoverable errors are isolated to a single query, record, or batch;
    /// the pipeline logs them, counts them, and continues. Everything else
    /// terminates the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PanbenchError::Io(_) | PanbenchError::Backend(_) | PanbenchError::Timeout(_)
        )
    }
}
