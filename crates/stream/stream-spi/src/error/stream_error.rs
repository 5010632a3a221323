//! Stream detection error types.

use thiserror::Error;

/// Errors raised by the detection pipeline.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StreamError {
    /// Shorthand for an [`StreamError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for stream detection operations.
pub type Result<T> = std::result::Result<T, StreamError>;
