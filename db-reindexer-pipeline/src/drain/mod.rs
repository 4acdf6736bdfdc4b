//! Drain module for the reindex pipeline.
//!
//! A drain walks one table's scan cursor to the end and indexes every
//! record it finds. Records within a page are dispatched concurrently; the
//! next page is only fetched once every dispatch of the current page has
//! settled.

use futures::future::join_all;
use tracing::{error, info, instrument};

use crate::errors::{PageFailure, PipelineError, RecordFailure};
use crate::scanner::{Page, TableScanner};
use db_reindexer_repository::{RecordIndexer, SearchEngineClient};
use db_reindexer_shared::Record;

/// What a completed drain did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainSummary {
    pub table: String,
    /// Pages fetched, including a trailing marker-only page.
    pub pages: usize,
    /// Records indexed.
    pub records: usize,
}

/// Index every record of `table` into `index`.
///
/// # Arguments
///
/// * `client` - Search client shared by every dispatched call
/// * `scanner` - Store to open the table's cursor on
/// * `table` - Source table identifier
/// * `index` - Destination index name
/// * `indexer` - Per-record indexing function for the table's entity kind
///
/// # Errors
///
/// * `PipelineError::ScanFailed` - a page fetch failed; nothing of that page was dispatched
/// * `PipelineError::MisplacedSentinel` - the end-of-scan marker was not the last element
/// * `PipelineError::PageFailed` - at least one record of a page failed; carries every failure
///   of that page. Later pages are not fetched.
#[instrument(skip(client, scanner, indexer))]
pub async fn drain(
    client: &dyn SearchEngineClient,
    scanner: &dyn TableScanner,
    table: &str,
    index: &str,
    indexer: &dyn RecordIndexer,
) -> Result<DrainSummary, PipelineError> {
    let mut cursor = scanner.open_cursor(table);
    let mut summary = DrainSummary {
        table: table.to_string(),
        pages: 0,
        records: 0,
    };

    let mut exhausted = false;
    while !exhausted {
        let mut page = cursor
            .fetch_page()
            .await
            .map_err(|source| PipelineError::scan(table, source))?;
        summary.pages += 1;

        exhausted = matches!(page.last(), Some(None));
        if exhausted {
            page.pop();
        }

        let records = into_records(page, table, summary.pages)?;

        info!(count = records.len(), "Indexing {} records from {}", records.len(), table);

        let outcomes = join_all(
            records
                .iter()
                .map(|record| indexer.index_record(client, record, index)),
        )
        .await;

        let failures: Vec<RecordFailure> = outcomes
            .into_iter()
            .enumerate()
            .filter_map(|(position, outcome)| {
                outcome.err().map(|error| RecordFailure { position, error })
            })
            .collect();

        if !failures.is_empty() {
            let failure = PageFailure {
                table: table.to_string(),
                page: summary.pages,
                succeeded: records.len() - failures.len(),
                failures,
            };
            error!(
                page = failure.page,
                failed = failure.failures.len(),
                succeeded = failure.succeeded,
                "Page failed to index"
            );
            return Err(PipelineError::PageFailed(failure));
        }

        summary.records += records.len();
        info!(count = records.len(), "Completed index of {} records from {}", records.len(), table);
    }

    Ok(summary)
}

/// Unwrap a page whose trailing marker has already been removed.
fn into_records(page: Page, table: &str, page_number: usize) -> Result<Vec<Record>, PipelineError> {
    page.into_iter()
        .enumerate()
        .map(|(position, item)| {
            item.ok_or_else(|| PipelineError::MisplacedSentinel {
                table: table.to_string(),
                page: page_number,
                position,
            })
        })
        .collect()
}
