//! Error types for the reindex pipeline.

use std::fmt;

use thiserror::Error;

use db_reindexer_repository::SearchIndexError;
use db_reindexer_shared::TableRole;

/// Errors raised by a table scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The table does not exist in the backing store.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The backing store could not be read.
    #[error("Read error on {table}: {message}")]
    ReadError { table: String, message: String },

    /// A stored row is not valid JSON.
    #[error("Parse error on {table} line {line}: {message}")]
    ParseError {
        table: String,
        line: usize,
        message: String,
    },
}

impl ScanError {
    /// Create a read error.
    pub fn read(table: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ReadError {
            table: table.into(),
            message: msg.into(),
        }
    }
}

/// One record of a page that could not be indexed.
#[derive(Debug, Clone)]
pub struct RecordFailure {
    /// Position of the record within its page.
    pub position: usize,
    pub error: SearchIndexError,
}

/// Outcome of a page whose dispatch had at least one failure.
///
/// Every dispatched call is awaited before this is built, so `failures`
/// holds all of them, not just the first.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub table: String,
    /// 1-based page number within the drain.
    pub page: usize,
    pub succeeded: usize,
    pub failures: Vec<RecordFailure>,
}

impl PageFailure {
    /// The failure of the earliest record in page order.
    pub fn first_error(&self) -> Option<&SearchIndexError> {
        self.failures.first().map(|f| &f.error)
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} records failed in page {} of {}",
            self.failures.len(),
            self.failures.len() + self.succeeded,
            self.page,
            self.table
        )?;
        if let Some(first) = self.first_error() {
            write!(f, " (first: {})", first)?;
        }
        Ok(())
    }
}

/// A table whose drain failed during a full reindex.
#[derive(Debug)]
pub struct TableFailure {
    pub role: TableRole,
    pub table: String,
    pub error: PipelineError,
}

/// Errors that can occur in the reindex pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Fetching a page from the source table failed.
    #[error("Scan of {table} failed: {source}")]
    ScanFailed {
        table: String,
        #[source]
        source: ScanError,
    },

    /// A page carried the end-of-scan marker somewhere other than last.
    #[error("Page {page} of {table} has an end-of-scan marker at position {position}")]
    MisplacedSentinel {
        table: String,
        page: usize,
        position: usize,
    },

    /// One or more records of a page failed to index.
    #[error("Index failure: {0}")]
    PageFailed(PageFailure),

    /// One or more tables failed during a full reindex.
    #[error("Reindex failed for {} table(s): {}", .failures.len(), describe(.failures))]
    ReindexFailed {
        failures: Vec<TableFailure>,
        /// Tables that drained cleanly alongside the failed ones.
        completed: Vec<String>,
    },
}

impl PipelineError {
    /// Create a scan failure for `table`.
    pub fn scan(table: impl Into<String>, source: ScanError) -> Self {
        Self::ScanFailed {
            table: table.into(),
            source,
        }
    }
}

fn describe(failures: &[TableFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({}): {}", f.role, f.table, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}
