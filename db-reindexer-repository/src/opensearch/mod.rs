//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! and `ClientConnector` using OpenSearch as the backend.

mod client;

pub use client::{OpenSearchClient, OpenSearchConnector};
