//! Error types for quarry
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::limits::LimitError;
use std::io;
use thiserror::Error;

/// Result type alias for quarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for quarry
#[derive(Debug, Error)]
pub enum Error {
    /// A document was rejected before it touched the shared index
    #[error("Invalid document '{name}': {reason}")]
    InvalidDocument {
        /// Name of the rejected document
        name: String,
        /// Which limit was violated
        reason: LimitError,
    },

    /// Configuration could not be parsed or holds out-of-range values
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config files, corpus directories)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Internal-consistency fault in the index
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Build an internal-consistency error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the error is local to one document and the caller may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidDocument { .. })
    }
}
