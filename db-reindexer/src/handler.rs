//! Invocation handler.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::ReindexError;
use db_reindexer_pipeline::scanner::TableScanner;
use db_reindexer_pipeline::{EntityBinding, ReindexOrchestrator};
use db_reindexer_repository::ClientConnector;
use db_reindexer_shared::{InvocationRequest, COMPLETION_MESSAGE};

/// Handles reindex invocations.
pub struct Reindexer {
    scanner: Arc<dyn TableScanner>,
    connector: Arc<dyn ClientConnector>,
    default_search_url: String,
}

impl Reindexer {
    pub fn new(
        scanner: Arc<dyn TableScanner>,
        connector: Arc<dyn ClientConnector>,
        default_search_url: impl Into<String>,
    ) -> Self {
        Self {
            scanner,
            connector,
            default_search_url: default_search_url.into(),
        }
    }

    /// Run one invocation to completion.
    ///
    /// Connects to the request's `esHost`, or the configured default, then
    /// reindexes the selected tables.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The completion message
    /// * `Err(ReindexError)` - The first failure of the run
    #[instrument(skip(self, request), fields(index = %request.index_name))]
    pub async fn handle(&self, request: &InvocationRequest) -> Result<String, ReindexError> {
        if request.index_name.trim().is_empty() {
            return Err(ReindexError::invalid_request("indexName must not be empty"));
        }

        info!("Starting index from database for index {}", request.index_name);

        let host = request
            .es_host
            .as_deref()
            .unwrap_or(self.default_search_url.as_str());
        let client = self.connector.connect(host).await?;

        let bindings = EntityBinding::for_tables(&request.tables);
        let orchestrator = ReindexOrchestrator::new(self.scanner.clone());
        let summary = orchestrator
            .reindex(
                &request.index_name,
                request.index_table.as_deref(),
                &bindings,
                client.as_ref(),
            )
            .await?;

        info!(
            tables = summary.tables.len(),
            records = summary.total_records(),
            "Index from database complete"
        );

        Ok(COMPLETION_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use db_reindexer_pipeline::scanner::MemoryTableStore;
    use db_reindexer_pipeline::PipelineError;
    use db_reindexer_repository::{SearchEngineClient, SearchIndexError};
    use db_reindexer_shared::TableNames;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock search client counting writes.
    struct MockSearchClient {
        indexed_count: AtomicUsize,
    }

    #[async_trait]
    impl SearchEngineClient for MockSearchClient {
        async fn index_document(
            &self,
            _index: &str,
            _document_id: &str,
            _document: &Value,
        ) -> Result<(), SearchIndexError> {
            self.indexed_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    /// Mock connector recording the hosts it was asked for.
    struct MockConnector {
        client: Arc<MockSearchClient>,
        hosts: Mutex<Vec<String>>,
        reachable: bool,
    }

    impl MockConnector {
        fn new(reachable: bool) -> Self {
            Self {
                client: Arc::new(MockSearchClient {
                    indexed_count: AtomicUsize::new(0),
                }),
                hosts: Mutex::new(Vec::new()),
                reachable,
            }
        }

        fn indexed(&self) -> usize {
            self.client.indexed_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ClientConnector for MockConnector {
        async fn connect(
            &self,
            host: &str,
        ) -> Result<Arc<dyn SearchEngineClient>, SearchIndexError> {
            self.hosts.lock().unwrap().push(host.to_string());
            if !self.reachable {
                return Err(SearchIndexError::connection(format!("{} unreachable", host)));
            }
            Ok(self.client.clone())
        }
    }

    fn tables() -> TableNames {
        TableNames {
            collections_table: "CollectionsTable".to_string(),
            executions_table: "ExecutionsTable".to_string(),
            async_operations_table: "AsyncOperationsTable".to_string(),
            granules_table: "GranulesTable".to_string(),
            pdrs_table: "PdrsTable".to_string(),
            providers_table: "ProvidersTable".to_string(),
            rules_table: "RulesTable".to_string(),
        }
    }

    fn store() -> MemoryTableStore {
        MemoryTableStore::with_page_size(2)
            .with_table("CollectionsTable", vec![json!({ "name": "MOD09GQ", "version": "006" })])
            .with_table("ExecutionsTable", vec![json!({ "arn": "arn:1" })])
            .with_table("AsyncOperationsTable", vec![json!({ "id": "op1" })])
            .with_table(
                "GranulesTable",
                vec![
                    json!({ "granuleId": "G1" }),
                    json!({ "granuleId": "G2" }),
                    json!({ "granuleId": "G3" }),
                ],
            )
            .with_table("PdrsTable", vec![json!({ "pdrName": "a.PDR" })])
            .with_table("ProvidersTable", vec![json!({ "id": "s3" })])
            .with_table("RulesTable", vec![json!({ "name": "r1" })])
    }

    fn request(index_table: Option<&str>, es_host: Option<&str>) -> InvocationRequest {
        InvocationRequest {
            index_name: "cumulus".to_string(),
            index_table: index_table.map(str::to_string),
            tables: tables(),
            es_host: es_host.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_full_reindex_returns_completion_message() {
        let connector = Arc::new(MockConnector::new(true));
        let reindexer = Reindexer::new(Arc::new(store()), connector.clone(), "http://default:9200");

        let result = reindexer.handle(&request(None, None)).await.unwrap();

        assert_eq!(result, "Index from database complete");
        assert_eq!(connector.indexed(), 9);
        assert_eq!(*connector.hosts.lock().unwrap(), vec!["http://default:9200"]);
    }

    #[tokio::test]
    async fn test_es_host_overrides_default() {
        let connector = Arc::new(MockConnector::new(true));
        let reindexer = Reindexer::new(Arc::new(store()), connector.clone(), "http://default:9200");

        reindexer
            .handle(&request(Some("granule"), Some("http://override:9200")))
            .await
            .unwrap();

        assert_eq!(*connector.hosts.lock().unwrap(), vec!["http://override:9200"]);
        assert_eq!(connector.indexed(), 3);
    }

    #[tokio::test]
    async fn test_unrecognized_table_completes_without_indexing() {
        let connector = Arc::new(MockConnector::new(true));
        let reindexer = Reindexer::new(Arc::new(store()), connector.clone(), "http://default:9200");

        let result = reindexer.handle(&request(Some("bogus"), None)).await.unwrap();

        assert_eq!(result, COMPLETION_MESSAGE);
        assert_eq!(connector.indexed(), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let connector = Arc::new(MockConnector::new(false));
        let reindexer = Reindexer::new(Arc::new(store()), connector.clone(), "http://default:9200");

        let err = reindexer.handle(&request(None, None)).await.unwrap_err();

        assert!(matches!(
            err,
            ReindexError::SearchError(SearchIndexError::ConnectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_table_failure_propagates() {
        let connector = Arc::new(MockConnector::new(true));
        let store = store().with_table("RulesTable", vec![json!({ "enabled": true })]);
        let reindexer = Reindexer::new(Arc::new(store), connector.clone(), "http://default:9200");

        let err = reindexer.handle(&request(None, None)).await.unwrap_err();

        assert!(matches!(
            err,
            ReindexError::PipelineError(PipelineError::ReindexFailed { .. })
        ));
        assert_eq!(connector.indexed(), 8);
    }

    #[tokio::test]
    async fn test_empty_index_name_rejected() {
        let connector = Arc::new(MockConnector::new(true));
        let reindexer = Reindexer::new(Arc::new(store()), connector.clone(), "http://default:9200");

        let mut req = request(None, None);
        req.index_name = "  ".to_string();

        let err = reindexer.handle(&req).await.unwrap_err();

        assert!(matches!(err, ReindexError::InvalidRequest(_)));
        assert!(connector.hosts.lock().unwrap().is_empty());
    }
}
