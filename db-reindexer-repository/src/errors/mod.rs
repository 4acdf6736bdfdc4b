//! Error types for the reindexer repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;
