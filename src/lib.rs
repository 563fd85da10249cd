//! Quarry - in-memory BM25 full-text search
//!
//! Quarry indexes named text documents and ranks them against free-text
//! queries with the Okapi BM25 relevance function.
//!
//! # Quick Start
//!
//! ```
//! use quarry::SearchEngine;
//!
//! let engine = SearchEngine::new();
//! engine.bulk_index([
//!     ("stoves", "Improved cookstoves cut household smoke."),
//!     ("fuels", "Charcoal, wood and dung as household fuels."),
//! ]);
//!
//! let hits = engine.search_top("cookstoves smoke", 10);
//! assert_eq!(hits[0].name, "stoves");
//! ```
//!
//! # Architecture
//!
//! - `quarry-core`: configuration, limits, errors and shared value types
//! - `quarry-search`: normalizer, inverted index, BM25 scoring and ranking
//!
//! This crate re-exports both.

pub use quarry_core::{
    BatchReport, Document, DocumentFailure, DocumentLimits, EngineConfig, Error, LimitError,
    RankedHit, Result, CONFIG_FILE_NAME,
};
pub use quarry_search::{
    idf, normalize, normalize_text, term_counts, top_n, Bm25Params, IndexStats, SearchEngine,
    TermCounts,
};
