//! Query evaluation: weighted query vector, score accumulation, top-K.

use crate::analysis::Analyzer;
use crate::index::dictionary::Dictionary;
use crate::index::postings::PostingsReader;
use crate::index::types::DocId;
use crate::scoring::{self, MAX_RESULTS, log_tf};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

/// Evaluates free-text queries against a loaded dictionary and an open
/// postings reader. Handles one query at a time; nothing is cached between
/// queries.
pub struct QueryProcessor<'a> {
    dictionary: &'a Dictionary,
    postings: &'a mut PostingsReader,
    analyzer: &'a Analyzer,
}

impl<'a> QueryProcessor<'a> {
    pub fn new(
        dictionary: &'a Dictionary,
        postings: &'a mut PostingsReader,
        analyzer: &'a Analyzer,
    ) -> Self {
        Self {
            dictionary,
            postings,
            analyzer,
        }
    }

    /// Rank documents for one query, best first, at most [`MAX_RESULTS`].
    ///
    /// Only documents found in at least one read posting list become
    /// candidates; an unknown query term contributes nothing and is
    /// silently skipped.
    pub fn execute(&mut self, query: &str) -> Result<Vec<DocId>> {
        let terms = self.analyzer.query_terms(query);

        let mut counts: FxHashMap<&str, u32> = FxHashMap::default();
        for term in &terms {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }

        let mut scores: FxHashMap<DocId, f64> = FxHashMap::default();
        for (term, &count) in &counts {
            let Some(entry) = self.dictionary.lookup(term) else {
                tracing::debug!(term, "term not in dictionary, skipped");
                continue;
            };

            // The query side carries idf, the stored document side does
            // not. A zero idf means the term occurs in every document and
            // cannot discriminate, so its posting list is not even read.
            let query_weight = log_tf(count) * entry.idf;
            if query_weight == 0.0 {
                tracing::debug!(term, "zero query weight, skipped");
                continue;
            }

            let posting = self.postings.read_posting(entry.postings_offset)?;
            for (doc_id, doc_weight) in posting {
                *scores.entry(doc_id).or_insert(0.0) += query_weight * doc_weight;
            }
        }

        // Cosine-normalize the document side only. The query vector's
        // scale is the same for every candidate of this query, so leaving
        // it un-normalized cannot change the order.
        for (doc_id, score) in scores.iter_mut() {
            let length = self
                .postings
                .doc_length(*doc_id)
                .with_context(|| format!("document {doc_id} has postings but no stored length"))?;
            *score /= length;
        }

        Ok(scoring::select_top_k(scores, MAX_RESULTS))
    }
}
