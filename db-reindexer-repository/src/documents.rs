//! Per-entity document shaping and indexing.
//!
//! Each source table holds one kind of entity. Shaping a record means
//! deriving its document ID from the entity's key field(s) and stamping the
//! record with its type and an index timestamp; the record is otherwise
//! written as-is.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::instrument;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchEngineClient;
use db_reindexer_shared::{Record, TableRole};

/// Separator between collection name and version in a collection ID.
const COLLECTION_ID_SEPARATOR: &str = "___";

/// The kinds of entity stored in the source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Collection,
    Execution,
    AsyncOperation,
    Granule,
    Pdr,
    Provider,
    Rule,
}

impl EntityKind {
    /// The entity kind stored in the table playing `role`.
    pub fn for_role(role: TableRole) -> Self {
        match role {
            TableRole::Collections => EntityKind::Collection,
            TableRole::Executions => EntityKind::Execution,
            TableRole::AsyncOperations => EntityKind::AsyncOperation,
            TableRole::Granules => EntityKind::Granule,
            TableRole::Pdrs => EntityKind::Pdr,
            TableRole::Providers => EntityKind::Provider,
            TableRole::Rules => EntityKind::Rule,
        }
    }

    /// The `recordType` value written on every document of this kind.
    pub fn record_type(&self) -> &'static str {
        match self {
            EntityKind::Collection => "collection",
            EntityKind::Execution => "execution",
            EntityKind::AsyncOperation => "asyncOperation",
            EntityKind::Granule => "granule",
            EntityKind::Pdr => "pdr",
            EntityKind::Provider => "provider",
            EntityKind::Rule => "rule",
        }
    }

    /// Record fields that make up the entity key, in order.
    fn key_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Collection => &["name", "version"],
            EntityKind::Execution => &["arn"],
            EntityKind::AsyncOperation => &["id"],
            EntityKind::Granule => &["granuleId"],
            EntityKind::Pdr => &["pdrName"],
            EntityKind::Provider => &["id"],
            EntityKind::Rule => &["name"],
        }
    }

    /// Derive the entity key from a record.
    ///
    /// Key fields may be strings or numbers; collection keys join name and
    /// version with `___`.
    pub fn entity_key(&self, record: &Record) -> Result<String, SearchIndexError> {
        let object = record.as_object().ok_or_else(|| {
            SearchIndexError::validation(format!(
                "{} record is not an object",
                self.record_type()
            ))
        })?;

        let mut parts = Vec::with_capacity(self.key_fields().len());
        for field in self.key_fields() {
            let part = match object.get(*field) {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(SearchIndexError::validation(format!(
                        "{} record is missing `{}`",
                        self.record_type(),
                        field
                    )))
                }
            };
            parts.push(part);
        }

        Ok(parts.join(COLLECTION_ID_SEPARATOR))
    }

    /// Shape a record into `(document_id, document)`.
    pub fn shape(&self, record: &Record) -> Result<(String, Value), SearchIndexError> {
        let key = self.entity_key(record)?;
        let document_id = format!("{}_{}", self.record_type(), key);

        let mut document = record.clone();
        if let Some(object) = document.as_object_mut() {
            object.insert("recordType".to_string(), json!(self.record_type()));
            object.insert("timestamp".to_string(), json!(Utc::now().timestamp_millis()));
        }

        Ok((document_id, document))
    }
}

/// Writes one raw record to the search index.
///
/// This is the per-record step of a drain: given the shared client, a
/// record and the destination index, write exactly one document or fail.
#[async_trait]
pub trait RecordIndexer: Send + Sync {
    async fn index_record(
        &self,
        client: &dyn SearchEngineClient,
        record: &Record,
        index: &str,
    ) -> Result<(), SearchIndexError>;
}

#[async_trait]
impl RecordIndexer for EntityKind {
    #[instrument(skip(self, client, record), fields(record_type = self.record_type()))]
    async fn index_record(
        &self,
        client: &dyn SearchEngineClient,
        record: &Record,
        index: &str,
    ) -> Result<(), SearchIndexError> {
        let (document_id, document) = self.shape(record)?;
        client.index_document(index, &document_id, &document).await
    }
}

pub async fn index_collection(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Collection.index_record(client, record, index).await
}

pub async fn index_execution(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Execution.index_record(client, record, index).await
}

pub async fn index_async_operation(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::AsyncOperation.index_record(client, record, index).await
}

pub async fn index_granule(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Granule.index_record(client, record, index).await
}

pub async fn index_pdr(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Pdr.index_record(client, record, index).await
}

pub async fn index_provider(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Provider.index_record(client, record, index).await
}

pub async fn index_rule(
    client: &dyn SearchEngineClient,
    record: &Record,
    index: &str,
) -> Result<(), SearchIndexError> {
    EntityKind::Rule.index_record(client, record, index).await
}
