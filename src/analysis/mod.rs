//! Text normalization: casefolding and stemming.
//!
//! The `Analyzer` is a stateless service with no mutable state shared
//! across calls; callers hold one instance and pass it by reference into
//! the indexing and search entry points.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Normalizes raw text into a sequence of index terms.
///
/// Document text is scanned with a word regex (letters, then letters,
/// digits, underscores, or apostrophes), which approximates sentence plus
/// word tokenization. Queries are simpler: whitespace-delimited tokens
/// only. Both sides are lowercased and stemmed with the English (Porter)
/// stemmer so that a query term always matches the indexed form.
pub struct Analyzer {
    stemmer: Stemmer,
    word_re: Regex,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            // \p{L} start keeps bare numbers out of the term space, matching
            // word-level tokenization of prose.
            word_re: Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid word regex"),
        }
    }

    /// Normalize one line of document text into terms.
    pub fn document_terms(&self, line: &str) -> Vec<String> {
        self.word_re
            .find_iter(line)
            .map(|m| self.normalize(m.as_str()))
            .collect()
    }

    /// Normalize a free-text query into terms (whitespace-delimited).
    pub fn query_terms(&self, query: &str) -> Vec<String> {
        query.split_whitespace().map(|t| self.normalize(t)).collect()
    }

    fn normalize(&self, token: &str) -> String {
        let lowered = token.to_lowercase();
        self.stemmer.stem(&lowered).into_owned()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
