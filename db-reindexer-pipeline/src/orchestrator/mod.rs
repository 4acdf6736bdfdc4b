//! Orchestrator module for the reindex pipeline.
//!
//! Decides which tables a run drains and runs those drains.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::drain::{drain, DrainSummary};
use crate::errors::{PipelineError, TableFailure};
use crate::scanner::TableScanner;
use db_reindexer_repository::{EntityKind, RecordIndexer, SearchEngineClient};
use db_reindexer_shared::{TableNames, TableRole};

/// Association of a source table with the function that indexes its rows.
#[derive(Clone)]
pub struct EntityBinding {
    pub role: TableRole,
    pub table: String,
    pub indexer: Arc<dyn RecordIndexer>,
}

impl EntityBinding {
    pub fn new(role: TableRole, table: impl Into<String>, indexer: Arc<dyn RecordIndexer>) -> Self {
        Self {
            role,
            table: table.into(),
            indexer,
        }
    }

    /// The seven standard bindings, each table indexed as its entity kind.
    pub fn for_tables(tables: &TableNames) -> Vec<EntityBinding> {
        TableRole::ALL
            .iter()
            .map(|role| {
                EntityBinding::new(
                    *role,
                    tables.table_for(*role),
                    Arc::new(EntityKind::for_role(*role)),
                )
            })
            .collect()
    }
}

/// How a run was asked to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReindexMode {
    /// Drain every table concurrently.
    Full,
    /// Drain one table.
    Single(TableRole),
    /// A selector was given but names no reindexable table. Nothing is drained.
    Unrecognized(String),
}

impl ReindexMode {
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            None => ReindexMode::Full,
            Some(name) => match TableRole::from_selector(name) {
                Some(role) => ReindexMode::Single(role),
                None => ReindexMode::Unrecognized(name.to_string()),
            },
        }
    }
}

/// Drains chosen for a run, all of which completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexSummary {
    pub tables: Vec<DrainSummary>,
}

impl ReindexSummary {
    pub fn total_records(&self) -> usize {
        self.tables.iter().map(|t| t.records).sum()
    }
}

/// Orchestrator that selects bindings and drains them.
pub struct ReindexOrchestrator {
    scanner: Arc<dyn TableScanner>,
}

impl ReindexOrchestrator {
    /// Create a new orchestrator reading tables from `scanner`.
    pub fn new(scanner: Arc<dyn TableScanner>) -> Self {
        Self { scanner }
    }

    /// Reindex into `index`.
    ///
    /// With no selector every binding is drained concurrently and all
    /// drains are awaited even if some fail. A recognised selector drains
    /// only its binding. An unrecognised selector drains nothing and
    /// succeeds.
    ///
    /// # Errors
    ///
    /// * Single-table mode returns the drain's own error.
    /// * Full mode returns `PipelineError::ReindexFailed` listing every failed table.
    #[instrument(skip(self, bindings, client), fields(run_id = %Uuid::new_v4()))]
    pub async fn reindex(
        &self,
        index: &str,
        selector: Option<&str>,
        bindings: &[EntityBinding],
        client: &dyn SearchEngineClient,
    ) -> Result<ReindexSummary, PipelineError> {
        match ReindexMode::from_selector(selector) {
            ReindexMode::Full => self.reindex_all(index, bindings, client).await,
            ReindexMode::Single(role) => {
                let Some(binding) = bindings.iter().find(|b| b.role == role) else {
                    warn!(role = %role, "No binding for selected table, nothing to reindex");
                    return Ok(ReindexSummary::default());
                };

                info!(role = %role, table = %binding.table, "Reindexing single table");
                let summary = self.drain_binding(binding, index, client).await?;
                Ok(ReindexSummary {
                    tables: vec![summary],
                })
            }
            ReindexMode::Unrecognized(name) => {
                warn!(selector = %name, "Unrecognized table selector, nothing to reindex");
                Ok(ReindexSummary::default())
            }
        }
    }

    async fn reindex_all(
        &self,
        index: &str,
        bindings: &[EntityBinding],
        client: &dyn SearchEngineClient,
    ) -> Result<ReindexSummary, PipelineError> {
        info!(tables = bindings.len(), "Reindexing all tables");

        let outcomes = join_all(
            bindings
                .iter()
                .map(|binding| self.drain_binding(binding, index, client)),
        )
        .await;

        let mut summary = ReindexSummary::default();
        let mut failures = Vec::new();
        for (binding, outcome) in bindings.iter().zip(outcomes) {
            match outcome {
                Ok(drained) => summary.tables.push(drained),
                Err(e) => {
                    error!(role = %binding.role, table = %binding.table, error = %e, "Table drain failed");
                    failures.push(TableFailure {
                        role: binding.role,
                        table: binding.table.clone(),
                        error: e,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::ReindexFailed {
                failures,
                completed: summary.tables.into_iter().map(|t| t.table).collect(),
            });
        }

        Ok(summary)
    }

    async fn drain_binding(
        &self,
        binding: &EntityBinding,
        index: &str,
        client: &dyn SearchEngineClient,
    ) -> Result<DrainSummary, PipelineError> {
        let summary = drain(
            client,
            self.scanner.as_ref(),
            &binding.table,
            index,
            binding.indexer.as_ref(),
        )
        .await?;

        info!(
            role = %binding.role,
            table = %summary.table,
            pages = summary.pages,
            records = summary.records,
            "Table drained"
        );
        Ok(summary)
    }
}
