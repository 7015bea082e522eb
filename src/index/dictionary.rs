//! Term dictionary: term string -> (term id, idf, postings offset).
//!
//! Two types cover the two lifecycle phases. [`TermDictionary`] is the
//! build-side accumulator: it assigns sequential term ids, counts document
//! frequencies, converts them to idf in one final pass, and serializes the
//! whole mapping. [`Dictionary`] is the frozen, read-only form loaded back
//! for query evaluation.

use crate::index::types::{DICT_MAGIC, DictEntry, FIRST_TERM_ID, FORMAT_VERSION, TermId};
use crate::scoring;
use crate::utils::{read_f64_le, read_u16_le, read_u32_le, read_u64_le};
use crate::utils::{write_f64_le, write_u16_le, write_u32_le, write_u64_le};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

struct TermInfo {
    term_id: TermId,
    /// Document frequency during the build, overwritten by idf in
    /// `finalize_idf`. The `idf` field is meaningless before that call.
    doc_freq: u32,
    idf: f64,
    postings_offset: u64,
}

/// Build-side term dictionary.
pub struct TermDictionary {
    terms: FxHashMap<String, TermInfo>,
    /// Term strings in id order; index `i` holds the term with id `i + 1`.
    id_to_term: Vec<String>,
    finalized: bool,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self {
            terms: FxHashMap::default(),
            id_to_term: Vec::new(),
            finalized: false,
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_term.is_empty()
    }

    /// Register one occurrence of `term` in the current document and return
    /// its id. The caller must de-duplicate per document before calling:
    /// `doc_freq` counts documents containing the term, not occurrences.
    pub fn add_term(&mut self, term: &str) -> TermId {
        debug_assert!(!self.finalized, "add_term after idf finalization");

        if let Some(info) = self.terms.get_mut(term) {
            info.doc_freq += 1;
            return info.term_id;
        }

        let term_id = self.id_to_term.len() as TermId + FIRST_TERM_ID;
        self.id_to_term.push(term.to_string());
        self.terms.insert(
            term.to_string(),
            TermInfo {
                term_id,
                doc_freq: 1,
                idf: 0.0,
                postings_offset: 0,
            },
        );
        term_id
    }

    /// One-shot conversion of every document frequency into
    /// `log10(n / df)`. Must run exactly once, after all `n` documents have
    /// been scanned and before the dictionary is persisted.
    pub fn finalize_idf(&mut self, n: u32) {
        debug_assert!(!self.finalized, "finalize_idf called twice");
        for info in self.terms.values_mut() {
            info.idf = scoring::idf(n, info.doc_freq);
        }
        self.finalized = true;
    }

    /// Record the postings file offset of a term's serialized posting list.
    pub fn record_offset(&mut self, term_id: TermId, offset: u64) {
        let term = &self.id_to_term[(term_id - FIRST_TERM_ID) as usize];
        if let Some(info) = self.terms.get_mut(term.as_str()) {
            info.postings_offset = offset;
        }
    }

    /// Serialize the whole dictionary, in ascending term-id order.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug_assert!(self.finalized, "dictionary persisted before idf finalization");

        let mut file = BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create dictionary file {}", path.display()))?,
        );

        file.write_all(DICT_MAGIC)?;
        write_u32_le(&mut file, FORMAT_VERSION)?;
        write_u32_le(&mut file, self.id_to_term.len() as u32)?;

        for term in &self.id_to_term {
            let info = &self.terms[term.as_str()];
            let bytes = term.as_bytes();
            write_u16_le(&mut file, bytes.len() as u16)?;
            file.write_all(bytes)?;
            write_u32_le(&mut file, info.term_id)?;
            write_f64_le(&mut file, info.idf)?;
            write_u64_le(&mut file, info.postings_offset)?;
        }

        file.flush()?;
        Ok(())
    }
}

impl Default for TermDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only dictionary loaded for query evaluation.
pub struct Dictionary {
    entries: FxHashMap<String, DictEntry>,
}

impl Dictionary {
    /// Deserialize a dictionary file written by [`TermDictionary::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = BufReader::new(
            File::open(path)
                .with_context(|| format!("failed to open dictionary file {}", path.display()))?,
        );

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != DICT_MAGIC {
            bail!("{} is not a dictionary file", path.display());
        }
        let version = read_u32_le(&mut file)?;
        if version != FORMAT_VERSION {
            bail!("unsupported dictionary format version {version}");
        }

        let count = read_u32_le(&mut file)? as usize;
        let mut entries = FxHashMap::with_capacity_and_hasher(count, Default::default());

        for _ in 0..count {
            let term_len = read_u16_le(&mut file)? as usize;
            let mut term_bytes = vec![0u8; term_len];
            file.read_exact(&mut term_bytes)?;
            let term =
                String::from_utf8(term_bytes).context("dictionary term is not valid UTF-8")?;

            let term_id = read_u32_le(&mut file)?;
            let idf = read_f64_le(&mut file)?;
            let postings_offset = read_u64_le(&mut file)?;

            entries.insert(
                term,
                DictEntry {
                    term_id,
                    idf,
                    postings_offset,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, term: &str) -> Option<&DictEntry> {
        self.entries.get(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_from_one() {
        let mut dict = TermDictionary::new();
        assert_eq!(dict.add_term("cat"), 1);
        assert_eq!(dict.add_term("dog"), 2);
        assert_eq!(dict.add_term("bird"), 3);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_repeated_term_keeps_id_and_counts_df() {
        let mut dict = TermDictionary::new();
        assert_eq!(dict.add_term("cat"), 1);
        // same term from two more documents
        assert_eq!(dict.add_term("cat"), 1);
        assert_eq!(dict.add_term("cat"), 1);
        dict.finalize_idf(3);
        // df 3 of 3 documents: idf must be exactly zero
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict");
        dict.save(&path).unwrap();
        let loaded = Dictionary::load(&path).unwrap();
        assert_eq!(loaded.lookup("cat").unwrap().idf, 0.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut dict = TermDictionary::new();
        dict.add_term("cat");
        dict.add_term("dog");
        dict.add_term("cat");
        dict.finalize_idf(2);
        dict.record_offset(1, 20);
        dict.record_offset(2, 44);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict");
        dict.save(&path).unwrap();

        let loaded = Dictionary::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);

        let cat = loaded.lookup("cat").unwrap();
        assert_eq!(cat.term_id, 1);
        assert_eq!(cat.postings_offset, 20);
        assert_eq!(cat.idf, 0.0); // df 2 of 2

        let dog = loaded.lookup("dog").unwrap();
        assert_eq!(dog.term_id, 2);
        assert_eq!(dog.postings_offset, 44);
        assert!((dog.idf - 2f64.log10()).abs() < 1e-12); // log10(2/1)

        assert!(loaded.lookup("bird").is_none());
    }

    #[test]
    fn test_load_rejects_wrong_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_dict");
        std::fs::write(&path, b"XXXXsomething").unwrap();
        assert!(Dictionary::load(&path).is_err());
    }
}
