//! Client factory trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchEngineClient;

/// Builds a search client for a given endpoint.
///
/// The endpoint is only known once an invocation arrives (it may override
/// the configured default), so clients are created per run rather than at
/// startup.
#[async_trait]
pub trait ClientConnector: Send + Sync {
    /// Connect to the search engine at `host`.
    ///
    /// Fails with `SearchIndexError::ConnectionError` if the endpoint is
    /// invalid or unreachable.
    async fn connect(&self, host: &str) -> Result<Arc<dyn SearchEngineClient>, SearchIndexError>;
}
