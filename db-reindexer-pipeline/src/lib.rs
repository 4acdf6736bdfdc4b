//! # DB Reindexer Pipeline
//!
//! This crate provides the pipeline components for re-populating a search
//! index from source tables.
//!
//! ## Architecture
//!
//! 1. **Scanner**: Pages through a source table
//! 2. **Drain**: Indexes every record of one table, page by page
//! 3. **Orchestrator**: Picks the tables of a run and drains them

pub mod drain;
pub mod errors;
pub mod orchestrator;
pub mod scanner;

pub use drain::{drain, DrainSummary};
pub use errors::{PipelineError, ScanError};
pub use orchestrator::{EntityBinding, ReindexMode, ReindexOrchestrator, ReindexSummary};
