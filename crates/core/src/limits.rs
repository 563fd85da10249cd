//! Size and shape limits for indexed documents
//!
//! Documents that violate a limit are rejected individually during bulk
//! indexing; the rest of the batch proceeds. Content is only checked for
//! size. Empty, whitespace-only or NUL-bearing content is not a violation:
//! the normalizer decides which terms, if any, the document yields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits applied to each document before it is tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLimits {
    /// Maximum document name length in bytes (default: 1024)
    pub max_name_bytes: usize,

    /// Maximum raw content length in bytes (default: 64MB)
    pub max_content_bytes: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        DocumentLimits {
            max_name_bytes: 1024,
            max_content_bytes: 64 * 1024 * 1024, // 64MB
        }
    }
}

impl DocumentLimits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        DocumentLimits {
            max_name_bytes: 16,
            max_content_bytes: 256,
        }
    }

    /// Validate a document name
    ///
    /// Names must be non-empty, free of NUL bytes and within `max_name_bytes`.
    pub fn validate_name(&self, name: &str) -> Result<(), LimitError> {
        if name.is_empty() {
            return Err(LimitError::EmptyName);
        }
        if name.len() > self.max_name_bytes {
            return Err(LimitError::NameTooLong {
                actual: name.len(),
                max: self.max_name_bytes,
            });
        }
        if name.as_bytes().contains(&0) {
            return Err(LimitError::NameContainsNul);
        }
        Ok(())
    }

    /// Validate raw document content
    ///
    /// Only the size is checked.
    pub fn validate_content(&self, content: &str) -> Result<(), LimitError> {
        if content.len() > self.max_content_bytes {
            return Err(LimitError::ContentTooLarge {
                actual: content.len(),
                max: self.max_content_bytes,
            });
        }
        Ok(())
    }

    /// Validate both halves of a document
    pub fn validate(&self, name: &str, content: &str) -> Result<(), LimitError> {
        self.validate_name(name)?;
        self.validate_content(content)
    }
}

/// Document validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    /// Document name is empty
    #[error("Document name is empty")]
    EmptyName,

    /// Document name exceeds maximum length
    #[error("Name too long: {actual} bytes exceeds maximum {max}")]
    NameTooLong {
        /// Actual name length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Document name contains a NUL byte
    #[error("Name contains NUL byte")]
    NameContainsNul,

    /// Content exceeds maximum size
    #[error("Content too large: {actual} bytes exceeds maximum {max}")]
    ContentTooLarge {
        /// Actual content size in bytes
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },
}

impl LimitError {
    /// Stable reason code for diagnostics
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::EmptyName => "empty_name",
            LimitError::NameTooLong { .. } => "name_too_long",
            LimitError::NameContainsNul => "name_contains_nul",
            LimitError::ContentTooLarge { .. } => "content_too_large",
        }
    }
}
