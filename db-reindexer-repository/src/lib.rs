//! # DB Reindexer Repository
//!
//! This crate provides the search side of a reindex run: the traits the
//! pipeline writes through, a concrete OpenSearch implementation, and the
//! per-entity functions that shape a raw table record into a document.

pub mod documents;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use documents::{EntityKind, RecordIndexer};
pub use errors::SearchIndexError;
pub use interfaces::{ClientConnector, SearchEngineClient};
pub use self::opensearch::{OpenSearchClient, OpenSearchConnector};
