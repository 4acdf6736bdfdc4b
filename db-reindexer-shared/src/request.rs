//! The invocation request accepted by the reindexer.

use serde::{Deserialize, Serialize};

use crate::tables::TableNames;

/// Returned by a successful invocation.
pub const COMPLETION_MESSAGE: &str = "Index from database complete";

/// A single reindex invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    /// Destination index for every document written by this run.
    pub index_name: String,
    /// Restrict the run to one table. `None` reindexes everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_table: Option<String>,
    /// Source table identifiers.
    pub tables: TableNames,
    /// Search endpoint override for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_host: Option<String>,
}
