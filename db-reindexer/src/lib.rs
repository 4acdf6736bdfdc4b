//! # DB Reindexer
//!
//! Main library for re-populating a search index from database tables.
//!
//! This crate provides the configuration, dependency wiring and invocation
//! handler behind the `db-reindexer` binary.

pub mod config;
pub mod handler;

pub use config::{Dependencies, ReindexConfig};
pub use handler::Reindexer;

use thiserror::Error;

/// Errors that can occur during reindexer initialization or execution.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The invocation request is unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] db_reindexer_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] db_reindexer_repository::SearchIndexError),

    /// The invocation request is not valid JSON.
    #[error("Request parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The process was asked to stop before the run finished.
    #[error("Reindex interrupted before completion")]
    Interrupted,
}

impl ReindexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
