//! Core types for quarry
//!
//! This crate defines the foundational pieces shared by the search engine
//! and its front ends:
//! - Document: a `(name, content)` pair supplied by an ingestion feed
//! - BatchReport / DocumentFailure: per-document diagnostics for bulk indexing
//! - RankedHit: one entry of a ranked, truncated result list
//! - DocumentLimits / LimitError: document validation
//! - EngineConfig: BM25 constants and indexing options, loadable from TOML
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod limits;
pub mod types;

pub use config::{EngineConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use limits::{DocumentLimits, LimitError};
pub use types::{BatchReport, Document, DocumentFailure, RankedHit};
