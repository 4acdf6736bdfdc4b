//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! and `ClientConnector` using the OpenSearch Rust client.

use std::sync::Arc;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    IndexParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::{ClientConnector, SearchEngineClient};

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
/// let client = OpenSearchClient::new("http://localhost:9200").await?;
/// client
///     .index_document("cumulus", "granule_G1", &json!({ "granuleId": "G1" }))
///     .await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is made; use `health_check` to verify the endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Interpret a `_cluster/health` response body.
    fn is_healthy_status(body: &Value) -> bool {
        matches!(
            body.get("status").and_then(Value::as_str),
            Some("green") | Some("yellow")
        )
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, document))]
    async fn index_document(
        &self,
        index: &str,
        document_id: &str,
        document: &Value,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, document_id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(document_id = %document_id, "Document indexed");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let healthy = Self::is_healthy_status(&body);
        debug!(status = ?body.get("status"), healthy, "Cluster health");
        Ok(healthy)
    }
}

/// Connects to OpenSearch and verifies the cluster before handing the
/// client out.
#[derive(Debug, Default, Clone)]
pub struct OpenSearchConnector;

impl OpenSearchConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientConnector for OpenSearchConnector {
    async fn connect(&self, host: &str) -> Result<Arc<dyn SearchEngineClient>, SearchIndexError> {
        let client = OpenSearchClient::new(host).await?;

        if !client.health_check().await? {
            return Err(SearchIndexError::connection(format!(
                "OpenSearch cluster at {} is unhealthy",
                host
            )));
        }

        info!(host = %host, "OpenSearch connection verified");
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_healthy_statuses() {
        assert!(OpenSearchClient::is_healthy_status(&json!({ "status": "green" })));
        assert!(OpenSearchClient::is_healthy_status(&json!({ "status": "yellow" })));
    }

    #[test]
    fn test_unhealthy_statuses() {
        assert!(!OpenSearchClient::is_healthy_status(&json!({ "status": "red" })));
        assert!(!OpenSearchClient::is_healthy_status(&json!({})));
        assert!(!OpenSearchClient::is_healthy_status(&json!({ "status": 1 })));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchClient::new("not a url").await;
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_connector_rejects_invalid_url() {
        let result = OpenSearchConnector::new().connect("::").await;
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }
}
