pub mod build;
pub mod dictionary;
pub mod postings;
pub mod stats;
pub mod types;

pub use dictionary::{Dictionary, TermDictionary};
pub use postings::{PostingsReader, PostingsStore};
pub use types::*;
