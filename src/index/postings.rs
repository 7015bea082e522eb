//! Postings accumulation, serialization, and random-access reading.
//!
//! The postings file starts with a magic/version header, then the lengths
//! record (doc id -> vector length) exactly once at that fixed position,
//! then one posting record per term laid out contiguously in ascending
//! term-id order. Each record is independently readable from the byte
//! offset recorded in the dictionary while it was written.

use crate::index::dictionary::TermDictionary;
use crate::index::types::{DocId, FIRST_TERM_ID, FORMAT_VERSION, HEADER_SIZE, POSTINGS_MAGIC, TermId};
use crate::utils::{read_f64_le, read_u32_le, write_f64_le, write_u32_le};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Bytes occupied by one (doc id, weight) pair on disk.
const PAIR_SIZE: u64 = 4 + 8;

/// In-memory postings accumulator, keyed by term id.
pub struct PostingsStore {
    /// Posting list for term id `i + 1` at index `i`. Lists stay sorted by
    /// doc id because documents are indexed in ascending id order.
    lists: Vec<Vec<(DocId, f64)>>,
}

impl PostingsStore {
    pub fn new() -> Self {
        Self { lists: Vec::new() }
    }

    /// Number of terms with a posting list.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Record the document-side weight of `term_id` in `doc_id`. One weight
    /// per (document, term) pair: a duplicate insertion is a caller bug and
    /// trips the debug assertion instead of silently overwriting.
    pub fn accumulate(&mut self, doc_id: DocId, term_id: TermId, weight: f64) {
        let idx = (term_id - FIRST_TERM_ID) as usize;
        if idx >= self.lists.len() {
            self.lists.resize_with(idx + 1, Vec::new);
        }
        let list = &mut self.lists[idx];
        debug_assert!(
            list.last().is_none_or(|&(last, _)| last < doc_id),
            "duplicate or out-of-order posting for doc {doc_id}, term {term_id}"
        );
        list.push((doc_id, weight));
    }

    /// Serialize the lengths record followed by every posting record in
    /// ascending term-id order, recording each record's starting byte
    /// offset into `dictionary`. The lengths record always precedes the
    /// posting records so a reader can locate it without any offset.
    pub fn write_all(
        &self,
        lengths: &BTreeMap<DocId, f64>,
        dictionary: &mut TermDictionary,
        path: &Path,
    ) -> Result<()> {
        debug_assert_eq!(
            self.lists.len(),
            dictionary.len(),
            "every dictionary term must have a posting list"
        );

        let mut file = BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create postings file {}", path.display()))?,
        );

        file.write_all(POSTINGS_MAGIC)?;
        write_u32_le(&mut file, FORMAT_VERSION)?;

        write_u32_le(&mut file, lengths.len() as u32)?;
        for (&doc_id, &length) in lengths {
            write_u32_le(&mut file, doc_id)?;
            write_f64_le(&mut file, length)?;
        }

        let mut offset = HEADER_SIZE + 4 + lengths.len() as u64 * PAIR_SIZE;

        for (idx, list) in self.lists.iter().enumerate() {
            dictionary.record_offset(idx as TermId + FIRST_TERM_ID, offset);
            write_u32_le(&mut file, list.len() as u32)?;
            for &(doc_id, weight) in list {
                write_u32_le(&mut file, doc_id)?;
                write_f64_le(&mut file, weight)?;
            }
            offset += 4 + list.len() as u64 * PAIR_SIZE;
        }

        file.flush()?;
        Ok(())
    }
}

impl Default for PostingsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Random-access reader over a frozen postings file.
///
/// The lengths record is loaded up front; posting lists are read one at a
/// time on demand and never cached, keeping memory bounded to a single
/// list regardless of index size.
pub struct PostingsReader {
    file: BufReader<File>,
    lengths: FxHashMap<DocId, f64>,
}

impl PostingsReader {
    /// Open a postings file, validate its header, and load the lengths
    /// record.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = BufReader::new(
            File::open(path)
                .with_context(|| format!("failed to open postings file {}", path.display()))?,
        );

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != POSTINGS_MAGIC {
            bail!("{} is not a postings file", path.display());
        }
        let version = read_u32_le(&mut file)?;
        if version != FORMAT_VERSION {
            bail!("unsupported postings format version {version}");
        }

        let count = read_u32_le(&mut file)? as usize;
        let mut lengths = FxHashMap::with_capacity_and_hasher(count, Default::default());
        for _ in 0..count {
            let doc_id = read_u32_le(&mut file)?;
            let length = read_f64_le(&mut file)?;
            lengths.insert(doc_id, length);
        }

        Ok(Self { file, lengths })
    }

    /// Number of documents in the index.
    pub fn doc_count(&self) -> u32 {
        self.lengths.len() as u32
    }

    /// Stored vector length for a document.
    pub fn doc_length(&self, doc_id: DocId) -> Option<f64> {
        self.lengths.get(&doc_id).copied()
    }

    /// Seek to a recorded offset and deserialize exactly one posting
    /// record. No other record is touched.
    pub fn read_posting(&mut self, offset: u64) -> Result<Vec<(DocId, f64)>> {
        self.file.seek(SeekFrom::Start(offset))?;
        let count = read_u32_le(&mut self.file)? as usize;
        let mut postings = Vec::with_capacity(count);
        for _ in 0..count {
            let doc_id = read_u32_le(&mut self.file)?;
            let weight = read_f64_le(&mut self.file)?;
            postings.push((doc_id, weight));
        }
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::dictionary::Dictionary;

    fn sample_index(dir: &Path) -> (Dictionary, PostingsReader) {
        let mut dictionary = TermDictionary::new();
        let mut store = PostingsStore::new();

        // doc 1: cat dog, doc 2: cat
        let cat = dictionary.add_term("cat");
        store.accumulate(1, cat, 1.0);
        let dog = dictionary.add_term("dog");
        store.accumulate(1, dog, 1.0);
        let cat_again = dictionary.add_term("cat");
        store.accumulate(2, cat_again, 1.3);

        dictionary.finalize_idf(2);

        let mut lengths = BTreeMap::new();
        lengths.insert(1, 2f64.sqrt());
        lengths.insert(2, 1.3);

        let postings_path = dir.join("postings");
        let dict_path = dir.join("dict");
        store.write_all(&lengths, &mut dictionary, &postings_path).unwrap();
        dictionary.save(&dict_path).unwrap();

        (
            Dictionary::load(&dict_path).unwrap(),
            PostingsReader::open(&postings_path).unwrap(),
        )
    }

    #[test]
    fn test_lengths_record_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let (_, reader) = sample_index(dir.path());

        assert_eq!(reader.doc_count(), 2);
        assert!((reader.doc_length(1).unwrap() - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(reader.doc_length(2), Some(1.3));
        assert_eq!(reader.doc_length(3), None);
    }

    #[test]
    fn test_read_posting_at_recorded_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let (dictionary, mut reader) = sample_index(dir.path());

        let cat = dictionary.lookup("cat").unwrap();
        let posting = reader.read_posting(cat.postings_offset).unwrap();
        assert_eq!(posting, vec![(1, 1.0), (2, 1.3)]);

        let dog = dictionary.lookup("dog").unwrap();
        let posting = reader.read_posting(dog.postings_offset).unwrap();
        assert_eq!(posting, vec![(1, 1.0)]);

        // records can be read in any order: seek back to the first one
        let posting = reader.read_posting(cat.postings_offset).unwrap();
        assert_eq!(posting.len(), 2);
    }

    #[test]
    fn test_posting_offsets_follow_lengths_record() {
        let dir = tempfile::tempdir().unwrap();
        let (dictionary, reader) = sample_index(dir.path());

        let lengths_end = HEADER_SIZE + 4 + reader.doc_count() as u64 * PAIR_SIZE;
        let cat = dictionary.lookup("cat").unwrap();
        let dog = dictionary.lookup("dog").unwrap();
        assert_eq!(cat.postings_offset, lengths_end);
        assert!(dog.postings_offset > cat.postings_offset);
    }

    #[test]
    fn test_open_rejects_wrong_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus");
        std::fs::write(&path, b"CSDIxxxxxxxx").unwrap();
        assert!(PostingsReader::open(&path).is_err());
    }

    #[test]
    #[should_panic(expected = "duplicate or out-of-order posting")]
    fn test_duplicate_posting_asserts_in_debug() {
        let mut store = PostingsStore::new();
        store.accumulate(1, 1, 1.0);
        store.accumulate(1, 1, 2.0);
    }
}
