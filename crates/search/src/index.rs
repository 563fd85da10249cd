//! In-memory document store and inverted index
//!
//! This module provides:
//! - DocumentStore: name → raw content and its length in characters
//! - InvertedIndex: term → (document name → raw term frequency)
//!
//! # Concurrency
//!
//! Tokenization happens outside this module. The only shared-state mutation
//! on the indexing path is [`InvertedIndex::merge`], which applies one
//! document's local tally under a single exclusive lock, so two documents'
//! increments never interleave. Readers take the shared side of the same lock
//! and may observe a batch that is only partly merged; no snapshot isolation
//! is provided.

use crate::normalizer::TermCounts;
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// DocumentStore
// ============================================================================

/// Raw content of one document plus its cached length
#[derive(Debug, Clone)]
pub(crate) struct StoredDocument {
    /// Verbatim content as supplied by the ingestion feed
    pub(crate) content: Arc<str>,
    /// Length of `content` in characters
    pub(crate) length: usize,
}

impl StoredDocument {
    fn new(content: Arc<str>) -> Self {
        let length = content.chars().count();
        StoredDocument { content, length }
    }
}

/// Concurrent name → document map
///
/// Last write wins for a repeated name.
#[derive(Debug, Default)]
pub(crate) struct DocumentStore {
    documents: DashMap<String, StoredDocument>,
}

impl DocumentStore {
    /// Store `content` under `name`, replacing any previous content
    pub(crate) fn put(&self, name: &str, content: Arc<str>) {
        self.documents
            .insert(name.to_string(), StoredDocument::new(content));
    }

    /// Number of distinct document names
    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    /// Length of a document in characters
    pub(crate) fn length(&self, name: &str) -> Option<usize> {
        self.documents.get(name).map(|d| d.length)
    }

    /// Raw content of a document
    pub(crate) fn content(&self, name: &str) -> Option<Arc<str>> {
        self.documents.get(name).map(|d| Arc::clone(&d.content))
    }

    /// All document names, sorted
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.documents.iter().map(|r| r.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Sum of all document lengths in characters
    pub(crate) fn total_length(&self) -> usize {
        self.documents.iter().map(|r| r.length).sum()
    }

    /// Average document length, `None` for an empty store
    pub(crate) fn average_length(&self) -> Option<f64> {
        let count = self.len();
        if count == 0 {
            return None;
        }
        Some(self.total_length() as f64 / count as f64)
    }
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Document name → raw term frequency
pub(crate) type Postings = FxHashMap<String, u32>;

/// Term → postings
pub(crate) type PostingsMap = FxHashMap<String, Postings>;

/// Inverted index from term to per-document frequencies
///
/// Outer entries are created lazily on first occurrence of a term. A term
/// that is absent has frequency 0 in every document. Looking a term up never
/// creates an entry.
#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    postings: RwLock<PostingsMap>,
}

impl InvertedIndex {
    /// Add one document's tally into the index
    ///
    /// Counts accumulate: merging the same name twice adds the counts rather
    /// than replacing them, saturating at `u32::MAX`. Holds the exclusive
    /// lock for the whole tally so the merge is atomic with respect to other
    /// merges.
    pub(crate) fn merge(&self, name: &str, counts: TermCounts) {
        if counts.is_empty() {
            return;
        }
        let mut postings = self.postings.write();
        for (term, count) in counts {
            let freq = postings
                .entry(term)
                .or_default()
                .entry(name.to_string())
                .or_insert(0);
            *freq = freq.saturating_add(count);
        }
    }

    /// Run `f` against the current postings under the shared lock
    pub(crate) fn read<R>(&self, f: impl FnOnce(&PostingsMap) -> R) -> R {
        f(&self.postings.read())
    }

    /// Number of documents containing `term`
    pub(crate) fn doc_freq(&self, term: &str) -> usize {
        self.read(|p| p.get(term).map_or(0, |docs| docs.len()))
    }

    /// Copy of the postings for `term`; empty when absent
    pub(crate) fn frequencies(&self, term: &str) -> HashMap<String, u32> {
        self.read(|p| {
            p.get(term)
                .map(|docs| docs.iter().map(|(n, &f)| (n.clone(), f)).collect())
                .unwrap_or_default()
        })
    }

    /// Sum of all counts recorded for `name` across every term
    pub(crate) fn token_count(&self, name: &str) -> u64 {
        self.read(|p| {
            p.values()
                .filter_map(|docs| docs.get(name))
                .map(|&f| f as u64)
                .sum()
        })
    }

    /// Number of distinct terms and of (term, document) entries
    pub(crate) fn sizes(&self) -> (usize, usize) {
        self.read(|p| (p.len(), p.values().map(|docs| docs.len()).sum()))
    }
}

// ============================================================================
// IndexStats
// ============================================================================

/// A snapshot of corpus statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of stored documents
    pub documents: usize,
    /// Number of distinct terms
    pub terms: usize,
    /// Number of (term, document) entries
    pub postings: usize,
    /// Sum of document lengths in characters
    pub total_length: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} docs, {} terms, {} postings, {} chars",
            self.documents, self.terms, self.postings, self.total_length
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
