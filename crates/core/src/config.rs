//! Engine configuration via `quarry.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock BM25 constants `k1 = 1.5`, `b = 0.75`.

use crate::error::{Error, Result};
use crate::limits::DocumentLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up by front ends.
pub const CONFIG_FILE_NAME: &str = "quarry.toml";

fn default_k1() -> f64 {
    1.5
}

fn default_b() -> f64 {
    0.75
}

fn default_parallel_indexing() -> bool {
    true
}

/// Search engine configuration.
///
/// The BM25 constants are fixed once an engine is constructed.
///
/// # Example
///
/// ```toml
/// k1 = 1.2
/// b = 0.75
/// parallel_indexing = true
///
/// [limits]
/// max_name_bytes = 1024
/// max_content_bytes = 67108864
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Term-frequency saturation (typical 1.2 to 2.0).
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Length-normalization strength, within `[0, 1]`.
    #[serde(default = "default_b")]
    pub b: f64,
    /// Tokenize batch documents on the rayon thread pool.
    #[serde(default = "default_parallel_indexing")]
    pub parallel_indexing: bool,
    /// Per-document validation limits.
    #[serde(default)]
    pub limits: DocumentLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            parallel_indexing: default_parallel_indexing(),
            limits: DocumentLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Config with custom BM25 constants and default everything else.
    pub fn with_params(k1: f64, b: f64) -> Self {
        Self {
            k1,
            b,
            ..Self::default()
        }
    }

    /// Check that the BM25 constants are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `k1` is negative or non-finite, or if `b`
    /// lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Error::config(format!(
                "k1 must be a finite, non-negative number (got {})",
                self.k1
            )));
        }
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(Error::config(format!(
                "b must be within [0, 1] (got {})",
                self.b
            )));
        }
        Ok(())
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# quarry search engine configuration

# BM25 term-frequency saturation (typical 1.2 - 2.0)
k1 = 1.5

# BM25 length normalization, 0 disables it, 1 applies it fully
b = 0.75

# Tokenize documents of a batch in parallel
parallel_indexing = true

[limits]
max_name_bytes = 1024
max_content_bytes = 67108864
"#
    }
}
