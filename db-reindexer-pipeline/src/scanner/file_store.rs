//! JSON-lines table store.
//!
//! Each table is a file `<root>/<table>.jsonl` holding one JSON record per
//! line, as produced by a table export.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use super::{Page, ScanCursor, TableScanner};
use crate::errors::ScanError;

/// File extension of table exports.
const TABLE_FILE_EXTENSION: &str = "jsonl";

/// Tables exported as JSON-lines files under one directory.
///
/// Pages follow the same rule as the in-memory store: a page shorter than
/// `page_size` is the last one and ends with the end-of-scan marker.
#[derive(Debug, Clone)]
pub struct FileTableStore {
    root: PathBuf,
    page_size: usize,
}

impl FileTableStore {
    pub fn new(root: impl Into<PathBuf>, page_size: usize) -> Self {
        Self {
            root: root.into(),
            page_size: page_size.max(1),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{}.{}", table, TABLE_FILE_EXTENSION))
    }
}

impl TableScanner for FileTableStore {
    fn open_cursor(&self, table: &str) -> Box<dyn ScanCursor> {
        Box::new(FileCursor {
            table: table.to_string(),
            path: self.table_path(table),
            lines: None,
            line_number: 0,
            page_size: self.page_size,
            exhausted: false,
        })
    }
}

struct FileCursor {
    table: String,
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    line_number: usize,
    page_size: usize,
    exhausted: bool,
}

impl FileCursor {
    async fn open(&mut self) -> Result<(), ScanError> {
        let file = File::open(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScanError::TableNotFound(self.table.clone()),
            _ => ScanError::read(&self.table, e.to_string()),
        })?;

        debug!(table = %self.table, path = %self.path.display(), "Opened table file");
        self.lines = Some(BufReader::new(file).lines());
        Ok(())
    }
}

#[async_trait]
impl ScanCursor for FileCursor {
    async fn fetch_page(&mut self) -> Result<Page, ScanError> {
        if self.exhausted {
            return Ok(vec![None]);
        }
        if self.lines.is_none() {
            self.open().await?;
        }

        let mut page = Page::with_capacity(self.page_size + 1);
        while page.len() < self.page_size {
            let next = match self.lines.as_mut() {
                Some(lines) => lines
                    .next_line()
                    .await
                    .map_err(|e| ScanError::read(&self.table, e.to_string()))?,
                None => None,
            };

            let Some(line) = next else {
                self.exhausted = true;
                break;
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str(&line).map_err(|e| ScanError::ParseError {
                table: self.table.clone(),
                line: self.line_number,
                message: e.to_string(),
            })?;
            page.push(Some(record));
        }

        if self.exhausted {
            page.push(None);
            self.lines = None;
        }

        Ok(page)
    }
}
