//! Error types for xornet.

use thiserror::Error;

/// Result type for xornet operations.
pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Error, Debug)]
pub enum NetError {
    /// A vector's length does not match the configured topology.
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed dataset text. `line` is 1-based.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetError {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> NetError {
        NetError::ShapeMismatch { what, expected, actual }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> NetError {
        NetError::InvalidConfiguration(message.into())
    }

    /// Returns an error if `actual` differs from `expected`.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetError::shape(what, expected, actual))
        }
    }
}
