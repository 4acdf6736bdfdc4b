//! In-process table store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Page, ScanCursor, TableScanner};
use crate::errors::ScanError;
use db_reindexer_shared::Record;

/// Default number of records per page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Tables held in memory, scanned in fixed-size pages.
///
/// A full page is returned without the end-of-scan marker; the page that
/// reaches the end of the table is shorter than `page_size` and carries the
/// marker. A table whose length is a multiple of the page size therefore
/// ends with a marker-only page.
#[derive(Debug, Clone)]
pub struct MemoryTableStore {
    tables: HashMap<String, Arc<Vec<Record>>>,
    page_size: usize,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty store returning at most `page_size` records per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            tables: HashMap::new(),
            page_size: page_size.max(1),
        }
    }

    /// Insert or replace a table.
    pub fn insert_table(&mut self, table: impl Into<String>, records: Vec<Record>) {
        self.tables.insert(table.into(), Arc::new(records));
    }

    /// Builder-style `insert_table`.
    pub fn with_table(mut self, table: impl Into<String>, records: Vec<Record>) -> Self {
        self.insert_table(table, records);
        self
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableScanner for MemoryTableStore {
    fn open_cursor(&self, table: &str) -> Box<dyn ScanCursor> {
        Box::new(MemoryCursor {
            table: table.to_string(),
            records: self.tables.get(table).cloned(),
            offset: 0,
            page_size: self.page_size,
            exhausted: false,
        })
    }
}

struct MemoryCursor {
    table: String,
    records: Option<Arc<Vec<Record>>>,
    offset: usize,
    page_size: usize,
    exhausted: bool,
}

#[async_trait]
impl ScanCursor for MemoryCursor {
    async fn fetch_page(&mut self) -> Result<Page, ScanError> {
        let records = self
            .records
            .as_ref()
            .ok_or_else(|| ScanError::TableNotFound(self.table.clone()))?;

        if self.exhausted {
            return Ok(vec![None]);
        }

        let end = (self.offset + self.page_size).min(records.len());
        let mut page: Page = records[self.offset..end].iter().cloned().map(Some).collect();
        self.offset = end;

        if page.len() < self.page_size {
            page.push(None);
            self.exhausted = true;
        }

        Ok(page)
    }
}
