//! Configuration for the reindexer.
//!
//! Settings are read once at startup and passed down explicitly; nothing
//! below this module reads the environment.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::path::PathBuf;

use crate::ReindexError;

/// Default search endpoint, used when a request carries no `esHost`.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default directory holding the table exports.
const DEFAULT_TABLE_DATA_DIR: &str = "./data";

/// Default number of records fetched per page.
const DEFAULT_SCAN_PAGE_SIZE: usize = 100;

/// Runtime configuration for the reindexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexConfig {
    /// Search endpoint used when the request does not override it.
    pub default_search_url: String,
    /// Directory of `<table>.jsonl` exports.
    pub table_data_dir: PathBuf,
    /// Records per scanned page.
    pub scan_page_size: usize,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            default_search_url: DEFAULT_OPENSEARCH_URL.to_string(),
            table_data_dir: PathBuf::from(DEFAULT_TABLE_DATA_DIR),
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
        }
    }
}

impl ReindexConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: default search endpoint (default: http://localhost:9200)
    /// - `TABLE_DATA_DIR`: directory of table exports (default: ./data)
    /// - `SCAN_PAGE_SIZE`: records per page (default: 100)
    pub fn from_env() -> Result<Self, ReindexError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReindexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_search_url = lookup("OPENSEARCH_URL").unwrap_or(defaults.default_search_url);
        let table_data_dir = lookup("TABLE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.table_data_dir);

        let scan_page_size = match lookup("SCAN_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    ReindexError::config(format!(
                        "SCAN_PAGE_SIZE must be a positive integer, got {:?}",
                        raw
                    ))
                })?,
            None => defaults.scan_page_size,
        };

        Ok(Self {
            default_search_url,
            table_data_dir,
            scan_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReindexConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReindexConfig::default());
        assert_eq!(config.default_search_url, "http://localhost:9200");
        assert_eq!(config.scan_page_size, 100);
    }

    #[test]
    fn test_overrides() {
        let config = ReindexConfig::from_lookup(lookup(&[
            ("OPENSEARCH_URL", "http://search:9200"),
            ("TABLE_DATA_DIR", "/exports"),
            ("SCAN_PAGE_SIZE", "25"),
        ]))
        .unwrap();

        assert_eq!(config.default_search_url, "http://search:9200");
        assert_eq!(config.table_data_dir, PathBuf::from("/exports"));
        assert_eq!(config.scan_page_size, 25);
    }

    #[test]
    fn test_invalid_page_size() {
        for raw in ["0", "-1", "ten"] {
            let result = ReindexConfig::from_lookup(lookup(&[("SCAN_PAGE_SIZE", raw)]));
            assert!(matches!(result, Err(ReindexError::ConfigError(_))), "{}", raw);
        }
    }
}
