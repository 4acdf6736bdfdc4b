//! Search engine client trait definition.
//!
//! This module defines the abstract interface the reindexer writes through,
//! allowing for different backend implementations (OpenSearch, mocks, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;

/// Abstract interface for search engine operations.
///
/// A single client is shared by every in-flight indexing call of a run,
/// across pages and across tables, so implementations must not rely on
/// per-call mutable state.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Write one document to `index` under `document_id`.
    ///
    /// If a document with the same ID already exists, it is replaced.
    ///
    /// # Arguments
    ///
    /// * `index` - The destination index name
    /// * `document_id` - The document ID within the index
    /// * `document` - The document body
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was indexed successfully
    /// * `Err(SearchIndexError)` - If the engine is unreachable or rejects the document
    async fn index_document(
        &self,
        index: &str,
        document_id: &str,
        document: &Value,
    ) -> Result<(), SearchIndexError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchIndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
