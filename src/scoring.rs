//! Shared weighting and ranking math.
//!
//! Documents and queries use an asymmetric scheme: document-side weights
//! are log-tf only, query-side weights are log-tf times idf. The scheme is
//! load-bearing for ranking output and must not be symmetrized.

use crate::index::types::DocId;

/// Maximum number of ranked documents returned per query.
pub const MAX_RESULTS: usize = 10;

/// Logarithmic term-frequency weight: `1 + log10(count)`, 0 for a zero
/// count (guards the undefined log; a zero count never occurs for terms
/// actually present).
pub fn log_tf(count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        1.0 + (count as f64).log10()
    }
}

/// Inverse document frequency: `log10(n / df)`.
///
/// `df` must be nonzero; terms only enter the dictionary from real
/// occurrences, so every df is at least 1.
pub fn idf(n: u32, df: u32) -> f64 {
    debug_assert!(df > 0, "idf of a term with zero document frequency");
    (n as f64 / df as f64).log10()
}

/// L2 norm of a weight vector.
pub fn vector_norm(weights: impl Iterator<Item = f64>) -> f64 {
    weights.map(|w| w * w).sum::<f64>().sqrt()
}

/// Select the top-K documents by descending score, ties broken by
/// ascending document id (lower id preferred).
pub fn select_top_k(scores: impl IntoIterator<Item = (DocId, f64)>, k: usize) -> Vec<DocId> {
    let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked.into_iter().map(|(doc_id, _)| doc_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_tf() {
        assert_eq!(log_tf(0), 0.0);
        assert_eq!(log_tf(1), 1.0);
        assert!((log_tf(10) - 2.0).abs() < 1e-12);
        assert!((log_tf(100) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_idf_term_in_every_document_is_zero() {
        assert_eq!(idf(7, 7), 0.0);
    }

    #[test]
    fn test_idf_rarer_terms_weigh_more() {
        assert!(idf(100, 1) > idf(100, 10));
        assert!((idf(100, 10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_norm() {
        let norm = vector_norm([3.0, 4.0].into_iter());
        assert!((norm - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_k_orders_by_score() {
        let scores = vec![(1, 0.2), (2, 0.9), (3, 0.5)];
        assert_eq!(select_top_k(scores, 10), vec![2, 3, 1]);
    }

    #[test]
    fn test_top_k_tie_break_prefers_lower_doc_id() {
        let scores = vec![(9, 0.5), (2, 0.5), (5, 0.5)];
        assert_eq!(select_top_k(scores, 10), vec![2, 5, 9]);
    }

    #[test]
    fn test_top_k_truncates() {
        let scores = (1..=20).map(|i| (i, i as f64)).collect::<Vec<_>>();
        let top = select_top_k(scores, MAX_RESULTS);
        assert_eq!(top.len(), MAX_RESULTS);
        assert_eq!(top[0], 20);
    }
}
