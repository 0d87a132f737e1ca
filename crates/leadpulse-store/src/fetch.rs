//! Paginated fetching
//!
//! The store caps every call at a fixed number of rows, so retrieving a
//! complete result set is a loop of consecutive offset pages under one
//! sort. `PageWalk` owns the offset bookkeeping: a lazy, finite,
//! non-restartable sequence of pages that terminates on a short batch or
//! store end-of-data. `fetch_all` drives it and folds batch failures into
//! a truncation flag instead of an error.

use std::future::Future;

use tracing::warn;

use crate::error::StoreResult;
use crate::query::Page;

/// Cursor over consecutive offset pages of a fixed size.
#[derive(Debug)]
pub struct PageWalk {
    page_size: u64,
    offset: u64,
    done: bool,
}

impl PageWalk {
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
            offset: 0,
            done: false,
        }
    }

    /// Next page to request, or `None` once the walk has ended.
    pub fn next_page(&mut self) -> Option<Page> {
        if self.done {
            return None;
        }
        Some(Page::new(self.offset, self.page_size))
    }

    /// Record how many rows the last page returned. A short or empty batch
    /// ends the walk.
    pub fn record(&mut self, returned: usize) {
        self.offset += returned as u64;
        if (returned as u64) < self.page_size {
            self.done = true;
        }
    }

    /// Mark the walk as ended without a result (failed batch).
    pub fn abort(&mut self) {
        self.done = true;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Accumulated result of a full paginated fetch.
///
/// `truncated` means a batch failed mid-walk and the rows only cover the
/// pages fetched before it; downstream computation proceeds on what is
/// here, but the result must never pass as complete data.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub rows: Vec<T>,
    pub truncated: bool,
}

impl<T> FetchOutcome<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            truncated: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.truncated
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

/// Fetch the complete result set for a query by looping fixed-size batches.
///
/// `next_batch` is called with consecutive pages under the store-applied
/// sort. A failed batch truncates the result: the error is logged as
/// non-fatal and accumulation stops. An empty first batch is valid empty
/// input, not an error.
pub async fn fetch_all<T, F, Fut>(page_size: u64, mut next_batch: F) -> FetchOutcome<T>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = StoreResult<Vec<T>>>,
{
    let mut walk = PageWalk::new(page_size);
    let mut rows = Vec::new();
    let mut truncated = false;

    while let Some(page) = walk.next_page() {
        match next_batch(page).await {
            Ok(batch) => {
                walk.record(batch.len());
                rows.extend(batch);
            }
            Err(err) => {
                warn!(
                    offset = page.offset,
                    limit = page.limit,
                    accumulated = rows.len(),
                    error = %err,
                    "batch fetch failed; truncating result set"
                );
                walk.abort();
                truncated = true;
            }
        }
    }

    FetchOutcome { rows, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_page_walk_terminates_on_short_batch() {
        let mut walk = PageWalk::new(3);

        let page = walk.next_page().unwrap();
        assert_eq!(page, Page::new(0, 3));
        walk.record(3);

        let page = walk.next_page().unwrap();
        assert_eq!(page, Page::new(3, 3));
        walk.record(2);

        assert!(walk.is_done());
        assert!(walk.next_page().is_none());
    }

    #[test]
    fn test_page_walk_terminates_on_empty_batch() {
        let mut walk = PageWalk::new(5);
        walk.record(0);
        assert!(walk.next_page().is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_accumulates_full_pages() {
        let data: Vec<u32> = (0..7).collect();
        let outcome = fetch_all(3, |page| {
            let batch: Vec<u32> = data
                .iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .copied()
                .collect();
            async move { Ok(batch) }
        })
        .await;

        assert_eq!(outcome.rows, data);
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn test_fetch_all_empty_first_batch_is_valid() {
        let outcome: FetchOutcome<u32> = fetch_all(3, |_page| async { Ok(Vec::new()) }).await;
        assert!(outcome.rows.is_empty());
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn test_fetch_all_truncates_on_batch_failure() {
        let outcome = fetch_all(2, |page| async move {
            if page.offset >= 4 {
                Err(StoreError::query("store went away"))
            } else {
                Ok(vec![page.offset, page.offset + 1])
            }
        })
        .await;

        // First two pages succeeded, third failed; result is flagged.
        assert_eq!(outcome.rows, vec![0, 1, 2, 3]);
        assert!(!outcome.is_complete());
    }

    #[tokio::test]
    async fn test_fetch_all_exact_multiple_ends_on_empty_page() {
        let data: Vec<u32> = (0..6).collect();
        let mut calls = 0u32;
        let outcome = fetch_all(3, |page| {
            calls += 1;
            let batch: Vec<u32> = data
                .iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .copied()
                .collect();
            async move { Ok(batch) }
        })
        .await;

        assert_eq!(outcome.rows, data);
        // Two full pages plus the terminating empty page.
        assert_eq!(calls, 3);
    }
}
