//! Dependency initialization and wiring for the reindexer.

use std::sync::Arc;

use tracing::info;

use crate::config::ReindexConfig;
use crate::handler::Reindexer;
use crate::ReindexError;
use db_reindexer_pipeline::scanner::FileTableStore;
use db_reindexer_repository::OpenSearchConnector;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured reindexer ready to handle invocations.
    pub reindexer: Reindexer,
}

impl Dependencies {
    /// Initialize all dependencies from configuration.
    ///
    /// The search client is not created here: each invocation may name its
    /// own endpoint, so connecting happens per request.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ReindexError)` - If the table data directory is missing
    pub fn new(config: &ReindexConfig) -> Result<Self, ReindexError> {
        info!(
            default_search_url = %config.default_search_url,
            table_data_dir = %config.table_data_dir.display(),
            scan_page_size = config.scan_page_size,
            "Initializing dependencies"
        );

        if !config.table_data_dir.is_dir() {
            return Err(ReindexError::config(format!(
                "Table data directory {} does not exist",
                config.table_data_dir.display()
            )));
        }

        let scanner = FileTableStore::new(&config.table_data_dir, config.scan_page_size);
        let connector = OpenSearchConnector::new();

        let reindexer = Reindexer::new(
            Arc::new(scanner),
            Arc::new(connector),
            config.default_search_url.clone(),
        );

        Ok(Self { reindexer })
    }
}
