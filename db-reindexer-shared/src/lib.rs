//! # DB Reindexer Shared
//!
//! Types shared between the reindexer crates: the raw record type, the
//! table roles a reindex run knows about, and the invocation request.

mod request;
mod tables;

pub use request::{InvocationRequest, COMPLETION_MESSAGE};
pub use tables::{TableNames, TableRole};

/// One raw row from a source table.
///
/// Records are never inspected by the scan or drain layers; only the
/// per-entity document shaping looks inside them.
pub type Record = serde_json::Value;
