pub mod processor;
pub mod search;

pub use processor::QueryProcessor;
pub use search::{SearchOptions, run_search};
