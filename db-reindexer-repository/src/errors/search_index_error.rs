//! Search index error types.
//!
//! This module defines the error types that can occur while shaping and
//! writing documents to the search index.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// The record could not be shaped into a document (missing or
    /// malformed key fields, not an object).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The search engine could not be reached or is unhealthy.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The search engine rejected the document.
    #[error("Index error: {0}")]
    IndexError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Whether this error means the record itself was bad, as opposed to
    /// the search engine misbehaving.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
