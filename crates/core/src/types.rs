//! Value types exchanged between the engine and its collaborators

use crate::limits::LimitError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Document
// ============================================================================

/// A document as supplied by an ingestion feed.
///
/// `content` is expected to be plain text, already stripped of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key; re-indexing the same name overwrites the stored content
    pub name: String,
    /// Raw text
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl<N, C> From<(N, C)> for Document
where
    N: Into<String>,
    C: Into<String>,
{
    fn from((name, content): (N, C)) -> Self {
        Document::new(name, content)
    }
}

// ============================================================================
// Batch diagnostics
// ============================================================================

/// A document that was rejected during bulk indexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Name of the rejected document
    pub name: String,
    /// Why it was rejected
    pub error: LimitError,
}

/// Outcome of one bulk-index call
///
/// Failures are isolated per document: a rejected document never touches
/// the shared index, and the remaining documents are still indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents whose terms were merged into the index
    pub indexed: usize,
    /// Rejected documents, in batch order
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// True when every document in the batch was indexed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total documents submitted in the batch
    pub fn submitted(&self) -> usize {
        self.indexed + self.failures.len()
    }
}

// ============================================================================
// RankedHit
// ============================================================================

/// One entry of a ranked result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    /// Rank in result set (1-indexed)
    pub rank: u32,
    /// Document name
    pub name: String,
    /// Summed BM25 score (higher = more relevant)
    pub score: f64,
}

impl RankedHit {
    /// Create a new ranked hit
    pub fn new(rank: u32, name: impl Into<String>, score: f64) -> Self {
        RankedHit {
            rank,
            name: name.into(),
            score,
        }
    }
}
