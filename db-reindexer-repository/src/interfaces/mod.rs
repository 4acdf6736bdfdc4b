//! Interface definitions for the search engine client.
//!
//! The reindex pipeline only ever talks to these traits, so backends can be
//! swapped for mocks in tests.

mod client_connector;
mod search_engine_client;

pub use client_connector::ClientConnector;
pub use search_engine_client::SearchEngineClient;
