//! In-memory full-text retrieval for quarry
//!
//! This crate provides:
//! - Text normalizer shared by indexing and querying
//! - Document store and inverted index with lock-protected merges
//! - BM25 scoring (`idf`, per-term scores, additive query scores)
//! - SearchEngine: bulk indexing and search over the above
//! - Ranking helper: sort a score map and keep the top `n`
//!
//! # Usage
//!
//! ```
//! use quarry_search::SearchEngine;
//!
//! let engine = SearchEngine::new();
//! engine.bulk_index([("a", "cat dog cat"), ("b", "dog dog dog")]);
//!
//! let scores = engine.search("cat");
//! assert!(scores.contains_key("a"));
//! assert!(!scores.contains_key("b"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod index;
pub mod normalizer;
pub mod ranking;
pub mod scorer;

// Re-export commonly used types
pub use engine::SearchEngine;
pub use index::IndexStats;
pub use normalizer::{normalize, normalize_text, term_counts, TermCounts};
pub use ranking::top_n;
pub use scorer::{idf, Bm25Params};
