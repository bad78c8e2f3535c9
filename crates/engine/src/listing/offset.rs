//! Offset pagination (strategy V1).
//!
//! Classic skip/take windowing paired with an exact total count. Cost of
//! the row fetch grows with the offset because the store discards that many
//! rows first; that linear degradation is the accepted cost of this
//! strategy, not something this module tries to hide.

use crate::error::EngineResult;
use crate::listing::filter::Predicate;
use crate::listing::types::{OffsetPage, OffsetWindow, SortSpec};
use crate::store::{QueryExecutor, RowFetch};

/// Fetch one offset-mode page plus its matching total.
///
/// The row fetch and the count run concurrently over the same predicate;
/// neither depends on the other's result.
pub async fn fetch_page(
    executor: &dyn QueryExecutor,
    predicate: &Predicate,
    sort: SortSpec,
    window: OffsetWindow,
) -> EngineResult<OffsetPage> {
    let fetch = RowFetch {
        predicate: predicate.clone(),
        sort,
        limit: u64::from(window.limit),
        offset: window.offset(),
        with_comment_count: true,
    };

    let (rows, total) = tokio::try_join!(
        executor.fetch_rows(&fetch),
        executor.count_rows(predicate)
    )?;

    Ok(OffsetPage::new(rows, total, window))
}
