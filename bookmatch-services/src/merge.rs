//! Recommendation merger
//!
//! Combines per-strategy score lists into one ranked list: weighted sum
//! per ISBN (a strategy that skipped a book contributes zero), then
//! normalization by the maximum combined score. An all-zero merge yields
//! an empty list rather than a division by zero.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use bookmatch_core::ScoredBook;

use crate::config::MergeWeights;

/// Merge any number of weighted strategy outputs.
///
/// Scores for the same ISBN accumulate additively across inputs before
/// normalization. Output is sorted descending with ISBN tie-break and
/// truncated to `top_k`; the best entry always scores exactly 1.0.
pub fn merge_weighted(inputs: &[(f64, &[ScoredBook])], top_k: usize) -> Vec<ScoredBook> {
    let mut combined: BTreeMap<&str, f64> = BTreeMap::new();
    for (weight, entries) in inputs {
        for entry in *entries {
            *combined.entry(entry.isbn.as_str()).or_insert(0.0) += weight * entry.score;
        }
    }

    let max = combined.values().fold(0.0f64, |acc, &v| acc.max(v));
    if max <= 0.0 {
        return Vec::new();
    }

    let mut merged: Vec<ScoredBook> = combined
        .into_iter()
        .map(|(isbn, score)| ScoredBook::new(isbn, score / max))
        .collect();

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.isbn.cmp(&b.isbn))
    });
    merged.truncate(top_k);
    merged
}

/// Merge the three matcher strategies with their configured weights.
pub fn merge_strategies(
    direct: &[ScoredBook],
    similarity: &[ScoredBook],
    cluster: &[ScoredBook],
    weights: &MergeWeights,
    top_k: usize,
) -> Vec<ScoredBook> {
    merge_weighted(
        &[
            (weights.direct, direct),
            (weights.similarity, similarity),
            (weights.cluster, cluster),
        ],
        top_k,
    )
}
