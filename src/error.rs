//! Error types for the preview store.

use thiserror::Error;

/// Common error type for the preview store.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for caller-supplied names or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for preview store operations.
pub type Result<T> = std::result::Result<T, PreviewError>;
