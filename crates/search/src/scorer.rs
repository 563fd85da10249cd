//! BM25 scoring
//!
//! For a term t and document d:
//!
//! ```text
//! idf(t)      = ln((N - n + 0.5) / (n + 0.5) + 1)
//! score(t, d) = idf(t) * f * (k1 + 1) / (f + k1 * (1 - b + b * dl / avdl))
//! ```
//!
//! Where:
//! - N = number of documents, n = documents containing t
//! - f = raw frequency of t in d
//! - dl = length of d, avdl = average document length (both in characters)

use quarry_core::EngineConfig;

/// Inverse document frequency.
///
/// Always positive for `doc_freq <= total_docs`: a term present in every
/// document still gets a small weight thanks to the `+ 1`. `doc_freq` is
/// clamped to `total_docs`.
pub fn idf(total_docs: usize, doc_freq: usize) -> f64 {
    let big_n = total_docs as f64;
    let n = doc_freq.min(total_docs) as f64;
    ((big_n - n + 0.5) / (n + 0.5) + 1.0).ln()
}

/// BM25 tuning constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// k1 parameter: term frequency saturation (default 1.5)
    pub k1: f64,
    /// b parameter: length normalization (default 0.75)
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.5, b: 0.75 }
    }
}

impl From<&EngineConfig> for Bm25Params {
    fn from(config: &EngineConfig) -> Self {
        Bm25Params {
            k1: config.k1,
            b: config.b,
        }
    }
}

impl Bm25Params {
    /// Create params with custom constants
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25Params { k1, b }
    }

    /// Score one term in one document.
    ///
    /// A non-positive `avdl` can only arise when every stored document is
    /// empty; the length ratio then falls back to 1.
    #[inline]
    pub fn term_score(&self, idf: f64, freq: u32, doc_len: usize, avdl: f64) -> f64 {
        if freq == 0 {
            return 0.0;
        }
        let f = freq as f64;
        let length_ratio = if avdl > 0.0 {
            doc_len as f64 / avdl
        } else {
            1.0
        };
        let numerator = f * (self.k1 + 1.0);
        let denominator = f + self.k1 * (1.0 - self.b + self.b * length_ratio);
        idf * numerator / denominator
    }
}
