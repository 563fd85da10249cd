//! Search engine: bulk indexing and BM25 query evaluation
//!
//! # Indexing
//!
//! A batch runs in two phases:
//!
//! 1. Sequentially, in batch order: validate each document, and store the
//!    content of each accepted document. Last write wins for a repeated name.
//! 2. Per document, in any order (on the rayon pool when
//!    `parallel_indexing` is set): build a private term tally, then merge it
//!    into the shared index under the index lock.
//!
//! Only the merge is serialized. When the batch completes, the cached
//! average document length is invalidated.
//!
//! # Querying
//!
//! Queries go through the same normalizer as documents. Each query term,
//! repeats included, contributes its BM25 scores additively. Documents that
//! match no query term are absent from the result.

use crate::index::{DocumentStore, IndexStats, InvertedIndex, PostingsMap};
use crate::normalizer::{normalize, normalize_text, term_counts};
use crate::ranking::top_n;
use crate::scorer::{idf, Bm25Params};
use parking_lot::Mutex;
use quarry_core::{
    BatchReport, Document, DocumentFailure, EngineConfig, Error, RankedHit, Result,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A validated document ready for tokenization
struct Pending {
    name: String,
    content: Arc<str>,
}

/// In-memory BM25 search engine
///
/// # Thread Safety
///
/// All operations take `&self`. Share the engine in an `Arc` to index from
/// one thread while querying from others. A query that runs during a batch
/// may see some of the batch's documents and not others.
pub struct SearchEngine {
    documents: DocumentStore,
    index: InvertedIndex,
    params: Bm25Params,
    config: EngineConfig,
    /// Cached average document length; `None` means "recompute on next read"
    avdl: Mutex<Option<f64>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("params", &self.params)
            .field("stats", &self.stats())
            .finish()
    }
}

impl SearchEngine {
    /// Create an empty engine with `k1 = 1.5`, `b = 0.75`
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an empty engine from a configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the BM25 constants are out of range.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an empty engine with custom BM25 constants
    pub fn with_params(k1: f64, b: f64) -> Result<Self> {
        Self::with_config(EngineConfig::with_params(k1, b))
    }

    fn build(config: EngineConfig) -> Self {
        SearchEngine {
            documents: DocumentStore::default(),
            index: InvertedIndex::default(),
            params: Bm25Params::from(&config),
            config,
            avdl: Mutex::new(None),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// BM25 constants in effect
    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no document has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all stored documents, sorted
    pub fn document_names(&self) -> Vec<String> {
        self.documents.names()
    }

    /// Raw content stored under `name`
    pub fn content(&self, name: &str) -> Option<String> {
        self.documents.content(name).map(|c| c.to_string())
    }

    /// Corpus statistics
    pub fn stats(&self) -> IndexStats {
        let (terms, postings) = self.index.sizes();
        IndexStats {
            documents: self.documents.len(),
            terms,
            postings,
            total_length: self.documents.total_length(),
        }
    }

    /// Document name → frequency for `term`
    ///
    /// The argument is normalized first. Empty when the term is unknown.
    pub fn term_frequencies(&self, term: &str) -> HashMap<String, u32> {
        self.index.frequencies(&normalize_text(term))
    }

    /// Sum of all term counts recorded for `name`
    pub fn indexed_token_count(&self, name: &str) -> u64 {
        self.index.token_count(name)
    }

    // ========================================================================
    // Average document length
    // ========================================================================

    /// Average document length in characters
    ///
    /// Cached; recomputed on the first read after a batch. `None` when the
    /// corpus is empty.
    pub fn avdl(&self) -> Option<f64> {
        let mut cached = self.avdl.lock();
        if cached.is_none() {
            *cached = self.documents.average_length();
        }
        *cached
    }

    fn invalidate_avdl(&self) {
        *self.avdl.lock() = None;
    }

    // ========================================================================
    // Indexing
    // ========================================================================

    /// Index a batch of `(name, content)` documents
    ///
    /// Documents that fail validation are reported in the returned
    /// [`BatchReport`] and never touch the index; the rest of the batch is
    /// still indexed. Re-indexing a name replaces its stored content but
    /// adds to its term counts.
    pub fn bulk_index<I, D>(&self, documents: I) -> BatchReport
    where
        I: IntoIterator<Item = D>,
        D: Into<Document>,
    {
        let mut report = BatchReport::default();
        let mut pending = Vec::new();

        for doc in documents.into_iter().map(Into::into) {
            let Document { name, content } = doc;
            match self.config.limits.validate(&name, &content) {
                Ok(()) => {
                    let content: Arc<str> = Arc::from(content);
                    self.documents.put(&name, Arc::clone(&content));
                    pending.push(Pending { name, content });
                }
                Err(error) => {
                    warn!(
                        target: "quarry::index",
                        name = %name,
                        reason = error.reason_code(),
                        "Document rejected"
                    );
                    report.failures.push(DocumentFailure { name, error });
                }
            }
        }

        debug!(
            target: "quarry::index",
            documents = pending.len(),
            parallel = self.config.parallel_indexing,
            "Merging batch"
        );

        let merge_one = |doc: &Pending| {
            let counts = term_counts(&doc.content);
            self.index.merge(&doc.name, counts);
        };
        if self.config.parallel_indexing {
            pending.par_iter().for_each(merge_one);
        } else {
            pending.iter().for_each(merge_one);
        }

        report.indexed = pending.len();
        self.invalidate_avdl();

        info!(
            target: "quarry::index",
            indexed = report.indexed,
            rejected = report.failures.len(),
            total_docs = self.len(),
            "Bulk index complete"
        );
        report
    }

    /// Index a batch, failing on the first rejected document
    ///
    /// The batch is still processed in full; this only turns the first
    /// failure of the report into an error.
    pub fn try_bulk_index<I, D>(&self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = D>,
        D: Into<Document>,
    {
        let report = self.bulk_index(documents);
        match report.failures.into_iter().next() {
            Some(DocumentFailure { name, error }) => Err(Error::InvalidDocument {
                name,
                reason: error,
            }),
            None => Ok(report.indexed),
        }
    }

    // ========================================================================
    // Scoring
    // ========================================================================

    /// Inverse document frequency of `term` in the current corpus
    pub fn idf(&self, term: &str) -> f64 {
        let key = normalize_text(term);
        let doc_freq = self.index.doc_freq(&key);
        idf(self.len(), doc_freq)
    }

    /// Per-document BM25 scores for a single term
    ///
    /// The argument is normalized first. Empty when the corpus is empty or
    /// the term is unknown.
    pub fn bm25(&self, term: &str) -> HashMap<String, f64> {
        let key = normalize_text(term);
        let mut scores = HashMap::new();
        let Some(avdl) = self.avdl() else {
            return scores;
        };
        let total_docs = self.len();
        self.index
            .read(|postings| self.accumulate(postings, &key, total_docs, avdl, &mut scores));
        scores
    }

    /// Score every document against a free-text query
    ///
    /// Returns a sparse map: documents matching no query term are absent.
    /// An empty query or an empty corpus yields an empty map.
    pub fn search(&self, query: &str) -> HashMap<String, f64> {
        let terms = normalize(query);
        let mut scores = HashMap::new();
        if terms.is_empty() {
            return scores;
        }
        let Some(avdl) = self.avdl() else {
            debug!(target: "quarry::search", "Search on empty corpus");
            return scores;
        };

        let total_docs = self.len();
        self.index.read(|postings| {
            for term in &terms {
                self.accumulate(postings, term, total_docs, avdl, &mut scores);
            }
        });

        debug!(
            target: "quarry::search",
            terms = terms.len(),
            hits = scores.len(),
            "Search complete"
        );
        scores
    }

    /// Search and return the best `n` hits in ranking order
    pub fn search_top(&self, query: &str, n: usize) -> Vec<RankedHit> {
        top_n(&self.search(query), n)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Verify that every index entry names a stored document
    ///
    /// Scoring skips such entries; this surfaces them.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` for the first orphaned entry found.
    pub fn check_consistency(&self) -> Result<()> {
        self.index.read(|postings| {
            for (term, docs) in postings {
                if let Some(name) = docs.keys().find(|n| self.documents.length(n).is_none()) {
                    return Err(Error::internal(format!(
                        "index entry for term '{}' names unknown document '{}'",
                        term, name
                    )));
                }
            }
            Ok(())
        })
    }

    /// Add the BM25 contribution of one normalized term into `scores`
    fn accumulate(
        &self,
        postings: &PostingsMap,
        term: &str,
        total_docs: usize,
        avdl: f64,
        scores: &mut HashMap<String, f64>,
    ) {
        let Some(docs) = postings.get(term) else {
            return;
        };
        let weight = idf(total_docs, docs.len());

        for (name, &freq) in docs {
            let Some(doc_len) = self.documents.length(name) else {
                error!(
                    target: "quarry::search",
                    name = %name,
                    term = %term,
                    "Index entry without stored document"
                );
                continue;
            };
            let score = self.params.term_score(weight, freq, doc_len, avdl);
            if score > 0.0 {
                *scores.entry(name.clone()).or_insert(0.0) += score;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{DocumentLimits, LimitError};

    const EPS: f64 = 1e-9;

    fn engine_with(docs: &[(&str, &str)]) -> SearchEngine {
        let engine = SearchEngine::new();
        let report = engine.bulk_index(docs.iter().copied());
        assert!(report.is_clean());
        engine
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = SearchEngine::new();
        assert!(engine.is_empty());
        assert_eq!(engine.avdl(), None);
        assert_eq!(engine.params(), Bm25Params::default());
        assert!(engine.search("anything").is_empty());
    }

    #[test]
    fn test_with_config_rejects_bad_params() {
        assert!(SearchEngine::with_params(1.2, 2.0).is_err());
        assert!(SearchEngine::with_params(-1.0, 0.5).is_err());
        let engine = SearchEngine::with_params(1.2, 0.5).unwrap();
        assert_eq!(engine.params(), Bm25Params::new(1.2, 0.5));
    }

    #[test]
    fn test_bulk_index_stores_and_counts() {
        let engine = engine_with(&[("a", "cat dog cat"), ("b", "dog dog dog")]);

        assert_eq!(engine.len(), 2);
        assert_eq!(engine.content("a").as_deref(), Some("cat dog cat"));
        assert_eq!(engine.term_frequencies("cat"), HashMap::from([("a".to_string(), 2)]));
        assert_eq!(
            engine.term_frequencies("DOG!"),
            HashMap::from([("a".to_string(), 1), ("b".to_string(), 3)])
        );
    }

    #[test]
    fn test_search_excludes_non_matching() {
        let engine = engine_with(&[("a", "cat dog cat"), ("b", "dog dog dog")]);
        let results = engine.search("cat");
        assert!(results.contains_key("a"));
        assert!(!results.contains_key("b"));
    }

    #[test]
    fn test_search_matches_formula() {
        let engine = engine_with(&[("a", "x y"), ("b", "x y x y x y x y x y")]);
        let results = engine.search("x");

        // avdl = (3 + 19) / 2 = 11, idf = ln(0.5 / 2.5 + 1)
        let w = 1.2f64.ln();
        let expected_a = w * 1.0 * 2.5 / (1.0 + 1.5 * (0.25 + 0.75 * 3.0 / 11.0));
        let expected_b = w * 5.0 * 2.5 / (5.0 + 1.5 * (0.25 + 0.75 * 19.0 / 11.0));

        assert!((results["a"] - expected_a).abs() < EPS);
        assert!((results["b"] - expected_b).abs() < EPS);
        // Per occurrence, the longer document earns less
        assert!(results["b"] / 5.0 < results["a"]);
    }

    #[test]
    fn test_repeated_query_term_counts_twice() {
        let engine = engine_with(&[("a", "cat dog"), ("b", "bird")]);
        let once = engine.search("cat");
        let twice = engine.search("cat cat");
        assert!((twice["a"] - 2.0 * once["a"]).abs() < EPS);
    }

    #[test]
    fn test_search_sums_terms() {
        let engine = engine_with(&[("a", "cat dog"), ("b", "dog bird"), ("c", "fish")]);
        let cat = engine.bm25("cat");
        let dog = engine.bm25("dog");
        let both = engine.search("cat dog");

        assert!((both["a"] - (cat["a"] + dog["a"])).abs() < EPS);
        assert!((both["b"] - dog["b"]).abs() < EPS);
        assert!(!both.contains_key("c"));
    }

    #[test]
    fn test_empty_query() {
        let engine = engine_with(&[("a", "cat")]);
        assert!(engine.search("").is_empty());
        assert!(engine.search("   \t ").is_empty());
        assert!(engine.search("?!...").is_empty());
    }

    #[test]
    fn test_unknown_term_is_noop() {
        let engine = engine_with(&[("a", "cat")]);
        assert!(engine.search("zebra").is_empty());
        assert!(engine.bm25("zebra").is_empty());
        assert_eq!(engine.stats().terms, 1);
    }

    #[test]
    fn test_avdl_invalidated_after_batch() {
        let engine = engine_with(&[("a", "ab")]);
        assert!((engine.avdl().unwrap() - 2.0).abs() < EPS);

        engine.bulk_index([("b", "abcdef")]);
        assert!((engine.avdl().unwrap() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_reindex_accumulates_counts_and_replaces_content() {
        let engine = engine_with(&[("a", "cat dog")]);
        engine.bulk_index([("a", "cat")]);

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.content("a").as_deref(), Some("cat"));
        assert_eq!(engine.term_frequencies("cat")["a"], 2);
        assert_eq!(engine.term_frequencies("dog")["a"], 1);
    }

    #[test]
    fn test_last_write_wins_within_batch() {
        let engine = SearchEngine::new();
        engine.bulk_index([("a", "first"), ("a", "second"), ("a", "third")]);
        assert_eq!(engine.content("a").as_deref(), Some("third"));
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.indexed_token_count("a"), 3);
    }

    #[test]
    fn test_empty_content_is_zero_length_document() {
        let engine = engine_with(&[("blank", ""), ("a", "cat")]);
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.indexed_token_count("blank"), 0);
        assert!((engine.avdl().unwrap() - 1.5).abs() < EPS);
        assert!(engine.term_frequencies("").is_empty());

        let results = engine.search("cat");
        assert_eq!(results.len(), 1);
        assert!(results["a"].is_finite());
    }

    #[test]
    fn test_only_empty_documents() {
        let engine = engine_with(&[("a", ""), ("b", "")]);
        assert_eq!(engine.avdl(), Some(0.0));
        assert!(engine.search("anything").is_empty());
    }

    #[test]
    fn test_rejected_documents_are_isolated() {
        let config = EngineConfig {
            limits: DocumentLimits::with_small_limits(),
            ..EngineConfig::default()
        };
        let engine = SearchEngine::with_config(config).unwrap();
        let huge = "cat ".repeat(100);
        let report = engine.bulk_index([
            ("good", "cat dog"),
            ("", "orphan"),
            ("binary", "cat\0dog"),
            ("huge", huge.as_str()),
            ("fine", "cat"),
        ]);

        assert_eq!(report.indexed, 3);
        let reasons: Vec<(&str, &LimitError)> = report
            .failures
            .iter()
            .map(|f| (f.name.as_str(), &f.error))
            .collect();
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0], ("", &LimitError::EmptyName));
        assert!(matches!(reasons[1].1, LimitError::ContentTooLarge { .. }));

        assert_eq!(engine.document_names(), vec!["binary", "fine", "good"]);
        assert_eq!(engine.term_frequencies("cat").len(), 3);
        assert!(engine.term_frequencies("orphan").is_empty());
    }

    #[test]
    fn test_nul_content_is_indexed() {
        let engine = SearchEngine::new();
        let report = engine.bulk_index([("good", "cat"), ("binary", "cat\0dog")]);

        assert!(report.is_clean());
        assert_eq!(engine.document_names(), vec!["binary", "good"]);
        assert_eq!(engine.content("binary").as_deref(), Some("cat\0dog"));
        assert_eq!(engine.term_frequencies("dog")["binary"], 1);

        let results = engine.search("dog");
        assert_eq!(results.len(), 1);
        assert!(results["binary"] > 0.0);
    }

    #[test]
    fn test_try_bulk_index() {
        let engine = SearchEngine::new();
        assert_eq!(engine.try_bulk_index([("a", "x"), ("b", "y")]).unwrap(), 2);

        let err = engine.try_bulk_index([("c", "z"), ("", "w")]).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
        // The valid part of the batch was still indexed
        assert!(engine.content("c").is_some());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let docs: Vec<(String, String)> = (0..50)
            .map(|i| (format!("doc{}", i), format!("common word{} word{}", i % 7, i % 3)))
            .collect();

        let parallel = SearchEngine::new();
        parallel.bulk_index(docs.clone());

        let sequential = SearchEngine::with_config(EngineConfig {
            parallel_indexing: false,
            ..EngineConfig::default()
        })
        .unwrap();
        sequential.bulk_index(docs);

        for term in ["common", "word0", "word1", "word2", "word6"] {
            assert_eq!(parallel.term_frequencies(term), sequential.term_frequencies(term));
        }
        assert_eq!(parallel.stats(), sequential.stats());
    }

    #[test]
    fn test_idf_monotone_in_doc_freq() {
        let engine = engine_with(&[
            ("a", "rare common"),
            ("b", "common"),
            ("c", "common medium"),
            ("d", "medium"),
        ]);
        assert!(engine.idf("rare") > engine.idf("medium"));
        assert!(engine.idf("medium") > engine.idf("common"));
        assert!(engine.idf("common") > 0.0);
    }

    #[test]
    fn test_search_top_ranks() {
        let engine = engine_with(&[("a", "cat dog cat"), ("b", "dog dog dog"), ("c", "cat")]);
        let hits = engine.search_top("cat", 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].rank, 1);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_consistency_check() {
        let engine = engine_with(&[("a", "cat dog"), ("b", "dog")]);
        assert!(engine.check_consistency().is_ok());

        // An index entry with no stored document is skipped by scoring and
        // reported by the check
        engine.index.merge("ghost", term_counts("cat"));
        let err = engine.check_consistency().unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("ghost"));

        let results = engine.search("cat");
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("a"));
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }
}
