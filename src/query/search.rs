//! Batch search run: queries file in, results file out.

use crate::analysis::Analyzer;
use crate::index::dictionary::Dictionary;
use crate::index::postings::PostingsReader;
use crate::query::processor::QueryProcessor;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Configuration for a search run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub dictionary_path: PathBuf,
    pub postings_path: PathBuf,
    /// Input file, one free-text query per line.
    pub queries_path: PathBuf,
    /// Output file, one line of ranked doc ids per query.
    pub results_path: PathBuf,
}

/// Run every query in input order, writing one result line per query:
/// whitespace-separated doc ids, an empty line when nothing matches,
/// single newlines between lines and no trailing newline after the last.
pub fn run_search(opts: &SearchOptions, analyzer: &Analyzer) -> Result<()> {
    let dictionary = Dictionary::load(&opts.dictionary_path)?;
    let mut postings = PostingsReader::open(&opts.postings_path)?;
    tracing::info!(
        terms = dictionary.len(),
        documents = postings.doc_count(),
        "index loaded"
    );

    let queries = BufReader::new(
        File::open(&opts.queries_path)
            .with_context(|| format!("failed to open queries file {}", opts.queries_path.display()))?,
    );
    // File::create truncates any stale results from a previous run.
    let mut results = BufWriter::new(
        File::create(&opts.results_path)
            .with_context(|| format!("failed to create results file {}", opts.results_path.display()))?,
    );

    let mut processor = QueryProcessor::new(&dictionary, &mut postings, analyzer);
    let mut separator = "";
    for line in queries.lines() {
        let query = line.context("failed to read queries file")?;
        let ranked = processor.execute(&query)?;
        let ids: Vec<String> = ranked.iter().map(|id| id.to_string()).collect();
        write!(results, "{separator}{}", ids.join(" "))?;
        separator = "\n";
    }

    results.flush()?;
    Ok(())
}
