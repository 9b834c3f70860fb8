//! Error types for error-payload serialization.

use thiserror::Error;

/// Errors that can occur while writing an error payload.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error while writing to the sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The inner error chain is nested deeper than the configured maximum.
    #[error("The depth limit for inner errors of {0} has been reached.")]
    RecursionDepthLimitReached(usize),

    /// Unsupported format or format variant.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl InterchangeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create an unsupported-format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}
