//! # cosi - Vector-Space Text Search Engine
//!
//! cosi builds an inverted index over a directory of text documents and
//! answers free-text queries by cosine-similarity ranking. The index is
//! batch-built once and then frozen: a term dictionary maps each term to
//! its inverse document frequency and the byte offset of its posting list,
//! and a postings file stores per-document vector lengths followed by one
//! independently seekable posting record per term.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`analysis`] - Text normalization (casefolding + stemming)
//! - [`index`] - Dictionary and postings construction, persistence, reading
//! - [`query`] - Query weighting, score accumulation, ranked retrieval
//! - [`scoring`] - Shared tf/idf weighting and top-K selection helpers
//! - [`utils`] - Binary encoding primitives for the on-disk formats
//!
//! ## Weighting scheme
//!
//! Documents are weighted with log-tf only (`1 + log10(count)`), queries
//! with log-tf times idf (`log10(N/df)`). Accumulated dot products are
//! divided by the document's pre-idf vector norm; the query vector is left
//! un-normalized, which does not change ranking within a single query.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cosi::analysis::Analyzer;
//! use cosi::index::build::{IndexOptions, build_index};
//! use cosi::query::search::{SearchOptions, run_search};
//!
//! let analyzer = Analyzer::new();
//! build_index(&index_opts, &analyzer)?;
//! run_search(&search_opts, &analyzer)?;
//! ```

pub mod analysis;
pub mod index;
pub mod query;
pub mod scoring;
pub mod utils;
