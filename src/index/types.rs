/// Unique identifier for a document; equal to the integer file name the
/// document was loaded from.
pub type DocId = u32;

/// Unique identifier for a term, assigned sequentially in first-seen order.
pub type TermId = u32;

/// The first term id handed out by the dictionary.
pub const FIRST_TERM_ID: TermId = 1;

/// Magic bytes at the start of a dictionary file.
pub const DICT_MAGIC: &[u8; 4] = b"CSDI";

/// Magic bytes at the start of a postings file.
pub const POSTINGS_MAGIC: &[u8; 4] = b"CSPO";

/// On-disk format version, shared by both files.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the magic + version header at the start of each file.
pub const HEADER_SIZE: u64 = 8;

/// Loaded dictionary entry for one term.
///
/// `postings_offset` is the absolute byte offset of the term's posting
/// record in the postings file, suitable for a direct seek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictEntry {
    pub term_id: TermId,
    pub idf: f64,
    pub postings_offset: u64,
}
