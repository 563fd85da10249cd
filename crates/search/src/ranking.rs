//! Ranking presentation: sort a score map and keep the top results
//!
//! Ordering is score descending, then name ascending. Equal BM25 scores are
//! common for documents with identical term statistics, so the name
//! tie-break keeps result pages stable across runs.

use quarry_core::RankedHit;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compare two `(name, score)` pairs in ranking order
#[inline]
fn ranking_order(a: &(&String, &f64), b: &(&String, &f64)) -> Ordering {
    b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// Rank `scores` and truncate to the best `n`.
///
/// Ranks are 1-based. `n == 0` yields an empty list.
///
/// # Example
///
/// ```
/// use quarry_search::ranking::top_n;
/// use std::collections::HashMap;
///
/// let scores = HashMap::from([("b".to_string(), 1.0), ("a".to_string(), 1.0), ("c".to_string(), 2.0)]);
/// let hits = top_n(&scores, 2);
/// assert_eq!(hits[0].name, "c");
/// assert_eq!(hits[1].name, "a");
/// ```
pub fn top_n(scores: &HashMap<String, f64>, n: usize) -> Vec<RankedHit> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &f64)> = scores.iter().collect();
    if entries.len() > n {
        entries.select_nth_unstable_by(n - 1, ranking_order);
        entries.truncate(n);
    }
    entries.sort_unstable_by(ranking_order);

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, &score))| RankedHit::new(i as u32 + 1, name.clone(), score))
        .collect()
}
