//! Precision@k / Recall@k evaluation.
//!
//! Relevance is corpus-global for these metrics: the ground truth is
//! flattened into one set of relevant filenames shared by every query,
//! rather than matched per suspicious document. That conflation is a known
//! limitation of the metric as defined for this corpus and is kept as-is.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::backend::QueryResult;
use crate::ground_truth::RelevanceRecord;

/// Precision and recall at each cutoff depth, aligned index-for-index with
/// `k_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallCurve {
    /// Cutoff depths, in the order the caller supplied them.
    pub k_values: Vec<usize>,
    /// Precision@k per cutoff.
    pub precision: Vec<f64>,
    /// Recall@k per cutoff.
    pub recall: Vec<f64>,
}

/// Compute Precision@k and Recall@k for every `k` in `k_values`.
///
/// For each cutoff, the retrieved list is the concatenation across all
/// query results of each result's top-`k` hit filenames; duplicates across
/// queries stay in the list and count in the precision denominator, while
/// relevance intersection is computed set-wise. Degenerate denominators
/// yield 0, not an error.
///
/// `k_values` is used exactly as given — not reordered, not deduplicated.
/// Callers wanting a sane curve supply ascending, unique values, and must
/// have requested at least `max(k_values)` hits per query upstream.
pub fn evaluate(
    ground_truth: &[RelevanceRecord],
    results: &[QueryResult],
    k_values: &[usize],
) -> PrecisionRecallCurve {
    let relevant_files: HashSet<&str> = ground_truth
        .iter()
        .flat_map(|record| record.relevant_source_files.iter())
        .map(String::as_str)
        .collect();

    let mut precision = Vec::with_capacity(k_values.len());
    let mut recall = Vec::with_capacity(k_values.len());

    for &k in k_values {
        let retrieved_at_k: Vec<&str> = results
            .iter()
            .flat_map(|result| result.hits.iter().take(k))
            .map(|hit| hit.filename.as_str())
            .collect();

        let retrieved_set: HashSet<&str> = retrieved_at_k.iter().copied().collect();
        let relevant_retrieved = retrieved_set.intersection(&relevant_files).count();

        precision.push(if retrieved_at_k.is_empty() {
            0.0
        } else {
            relevant_retrieved as f64 / retrieved_at_k.len() as f64
        });
        recall.push(if relevant_files.is_empty() {
            0.0
        } else {
            relevant_retrieved as f64 / relevant_files.len() as f64
        });
    }

    PrecisionRecallCurve {
        k_values: k_values.to_vec(),
        precision,
        recall,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::backend::Hit;

    fn record(id: &str, files: &[&str]) -> RelevanceRecord {
        RelevanceRecord {
            suspicious_document_id: id.to_string(),
            relevant_source_files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn result(hits: &[&str]) -> QueryResult {
        QueryResult {
            query_path: PathBuf::from("query.txt"),
            term_set: vec!["term".to_string()],
            hits: hits
                .iter()
                .enumerate()
                .map(|(i, name)| Hit {
                    filename: name.to_string(),
                    score: 10.0 - i as f64,
                })
                .collect(),
            search_latency: Duration::from_millis(5),
            preprocessing_latency: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_half_relevant_at_two() {
        // relevant = {d1, d2}; retrieved@2 = [d1, d3].
        let truth = vec![record("meta.json", &["d1.txt", "d2.txt"])];
        let results = vec![result(&["d1.txt", "d3.txt"])];

        let curve = evaluate(&truth, &results, &[2]);
        assert_eq!(curve.precision, vec![0.5]);
        assert_eq!(curve.recall, vec![0.5]);
    }

    #[test]
    fn test_empty_retrieved_is_zero_not_error() {
        let truth = vec![record("meta.json", &["d1.txt"])];
        let results = vec![result(&[])];

        let curve = evaluate(&truth, &results, &[2, 4]);
        assert_eq!(curve.precision, vec![0.0, 0.0]);
        assert_eq!(curve.recall, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_relevant_set_is_zero_recall() {
        let truth = vec![record("meta.json", &[])];
        let results = vec![result(&["d1.txt"])];

        let curve = evaluate(&truth, &results, &[1]);
        assert_eq!(curve.precision, vec![0.0]);
        assert_eq!(curve.recall, vec![0.0]);
    }

    #[test]
    fn test_metrics_stay_in_unit_interval() {
        let truth = vec![
            record("a.json", &["d1.txt", "d2.txt"]),
            record("b.json", &["d2.txt", "d3.txt"]),
        ];
        let results = vec![
            result(&["d1.txt", "d4.txt", "d2.txt"]),
            result(&["d3.txt", "d1.txt"]),
        ];

        let curve = evaluate(&truth, &results, &[1, 2, 3]);
        for (p, r) in curve.precision.iter().zip(&curve.recall) {
            assert!((0.0..=1.0).contains(p));
            assert!((0.0..=1.0).contains(r));
        }
    }

    #[test]
    fn test_recall_is_monotonic_in_k() {
        let truth = vec![record("meta.json", &["d1.txt", "d3.txt", "d5.txt"])];
        let results = vec![
            result(&["d1.txt", "d2.txt", "d3.txt", "d4.txt", "d5.txt"]),
            result(&["d9.txt", "d3.txt", "d8.txt"]),
        ];

        let curve = evaluate(&truth, &results, &[1, 2, 3, 4, 5]);
        for window in curve.recall.windows(2) {
            assert!(window[1] >= window[0], "recall dropped: {:?}", curve.recall);
        }
    }

    #[test]
    fn test_ground_truth_is_unioned_across_records() {
        // Two records naming the same file: the relevant set has 2 entries,
        // not 3.
        let truth = vec![
            record("a.json", &["d1.txt", "shared.txt"]),
            record("b.json", &["shared.txt"]),
        ];
        let results = vec![result(&["shared.txt", "d1.txt"])];

        let curve = evaluate(&truth, &results, &[2]);
        assert_eq!(curve.precision, vec![1.0]);
        assert_eq!(curve.recall, vec![1.0]);
    }

    #[test]
    fn test_duplicates_across_queries_count_in_precision_denominator() {
        // Both queries retrieve d1; the retrieved list has length 2 but only
        // one distinct relevant file.
        let truth = vec![record("meta.json", &["d1.txt"])];
        let results = vec![result(&["d1.txt"]), result(&["d1.txt"])];

        let curve = evaluate(&truth, &results, &[1]);
        assert_eq!(curve.precision, vec![0.5]);
        assert_eq!(curve.recall, vec![1.0]);
    }

    #[test]
    fn test_k_values_are_used_as_given() {
        let truth = vec![record("meta.json", &["d1.txt"])];
        let results = vec![result(&["d1.txt", "d2.txt"])];

        let curve = evaluate(&truth, &results, &[4, 1, 4]);
        assert_eq!(curve.k_values, vec![4, 1, 4]);
        assert_eq!(curve.precision.len(), 3);
        assert_eq!(curve.precision[0], curve.precision[2]);
    }
}
