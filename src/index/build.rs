//! Indexing run: corpus directory -> dictionary file + postings file.
//!
//! Documents are processed strictly sequentially in ascending id order;
//! term-id assignment (and therefore byte-identical index output) depends
//! on that ordering.

use crate::analysis::Analyzer;
use crate::index::dictionary::TermDictionary;
use crate::index::postings::PostingsStore;
use crate::index::types::DocId;
use crate::scoring::{log_tf, vector_norm};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::collections::hash_map::Entry;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Configuration for an indexing run.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Directory containing one file per document, file name = integer id.
    pub input_dir: PathBuf,
    /// Output path for the term dictionary.
    pub dictionary_path: PathBuf,
    /// Output path for the postings file.
    pub postings_path: PathBuf,
}

/// Summary of a completed indexing run.
#[derive(Debug, Clone, Copy)]
pub struct IndexSummary {
    pub documents: u32,
    pub terms: u32,
}

/// Raw term counts for one document, preserving first-occurrence order so
/// term ids are assigned deterministically.
struct DocVector {
    counts: FxHashMap<String, u32>,
    order: Vec<String>,
}

impl DocVector {
    fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    fn add(&mut self, term: String) {
        match self.counts.entry(term) {
            Entry::Occupied(mut e) => *e.get_mut() += 1,
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(1);
            }
        }
    }
}

/// Build the full index for a corpus directory.
pub fn build_index(opts: &IndexOptions, analyzer: &Analyzer) -> Result<IndexSummary> {
    let doc_ids = collect_doc_ids(&opts.input_dir)?;
    if doc_ids.is_empty() {
        bail!("no documents found in {}", opts.input_dir.display());
    }
    tracing::info!(documents = doc_ids.len(), "indexing {}", opts.input_dir.display());

    let mut dictionary = TermDictionary::new();
    let mut postings = PostingsStore::new();
    let mut lengths: BTreeMap<DocId, f64> = BTreeMap::new();

    for &doc_id in &doc_ids {
        index_document(
            doc_id,
            &opts.input_dir,
            analyzer,
            &mut dictionary,
            &mut postings,
            &mut lengths,
        )?;
    }

    // Document frequencies and N are only correct once every document has
    // been scanned, so the idf conversion runs here, exactly once, before
    // either file is persisted.
    dictionary.finalize_idf(doc_ids.len() as u32);
    postings.write_all(&lengths, &mut dictionary, &opts.postings_path)?;
    dictionary.save(&opts.dictionary_path)?;

    tracing::info!(
        terms = dictionary.len(),
        "wrote {} and {}",
        opts.dictionary_path.display(),
        opts.postings_path.display()
    );

    Ok(IndexSummary {
        documents: doc_ids.len() as u32,
        terms: dictionary.len() as u32,
    })
}

/// List the corpus directory. Every file name must parse as an integer
/// document id; the result is sorted ascending.
fn collect_doc_ids(input_dir: &Path) -> Result<Vec<DocId>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read corpus directory {}", input_dir.display()))?;

    let mut doc_ids = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let doc_id: DocId = name
            .parse()
            .with_context(|| format!("document file name {name:?} is not an integer id"))?;
        doc_ids.push(doc_id);
    }

    doc_ids.sort_unstable();
    Ok(doc_ids)
}

/// Index a single document: normalize, count, weight, record.
fn index_document(
    doc_id: DocId,
    input_dir: &Path,
    analyzer: &Analyzer,
    dictionary: &mut TermDictionary,
    postings: &mut PostingsStore,
    lengths: &mut BTreeMap<DocId, f64>,
) -> Result<()> {
    let path = input_dir.join(doc_id.to_string());
    let file = BufReader::new(
        File::open(&path).with_context(|| format!("failed to open document {}", path.display()))?,
    );

    let mut vector = DocVector::new();
    for line in file.lines() {
        let line = line.with_context(|| format!("failed to read document {}", path.display()))?;
        for term in analyzer.document_terms(&line) {
            vector.add(term);
        }
    }

    // Counts become log-tf weights; the stored length is the L2 norm over
    // these pre-idf weights (idf never touches the document side).
    let weights: Vec<f64> = vector.order.iter().map(|t| log_tf(vector.counts[t])).collect();
    lengths.insert(doc_id, vector_norm(weights.iter().copied()));

    for (term, &weight) in vector.order.iter().zip(weights.iter()) {
        let term_id = dictionary.add_term(term);
        postings.accumulate(doc_id, term_id, weight);
    }

    Ok(())
}
