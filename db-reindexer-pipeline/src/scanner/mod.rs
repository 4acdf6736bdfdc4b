//! Scanner module for the reindex pipeline.
//!
//! A scan walks one source table page by page. The final page of a scan is
//! terminated by an end-of-scan marker (a trailing `None`); a page without
//! the marker means more pages may follow, even if it is empty.

mod file_store;
mod memory_store;

pub use file_store::FileTableStore;
pub use memory_store::MemoryTableStore;

use async_trait::async_trait;

use crate::errors::ScanError;
use db_reindexer_shared::Record;

/// One fetched page. A trailing `None` marks the end of the scan.
pub type Page = Vec<Option<Record>>;

/// A cursor over a single table.
///
/// Each drain opens its own cursor; cursors are never shared.
#[async_trait]
pub trait ScanCursor: Send {
    /// Fetch the next page of the scan.
    ///
    /// Once the end-of-scan marker has been returned, further calls keep
    /// returning a page holding only the marker.
    async fn fetch_page(&mut self) -> Result<Page, ScanError>;
}

/// A store whose tables can be scanned end to end.
pub trait TableScanner: Send + Sync {
    /// Open a fresh cursor positioned at the start of `table`.
    ///
    /// Problems reaching the table surface on the first `fetch_page`.
    fn open_cursor(&self, table: &str) -> Box<dyn ScanCursor>;
}
