//! Listing service: request orchestration over the query executor.
//!
//! Stateless per request; the executor handle is the only shared resource
//! and the store's own concurrency discipline applies to it.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::listing::estimator::CountEstimator;
use crate::listing::filter::{Clause, ClauseValue, Predicate};
use crate::listing::types::{
    CountResult, CursorPage, CursorWindow, FilterCriteria, OffsetPage, OffsetWindow, SearchMode,
    SortDirection, SortKey, SortSpec,
};
use crate::listing::{cursor, offset};
use crate::models::post::PostWithAuthor;
use crate::store::{QueryExecutor, RowFetch};

/// High-level listing API consumed by the transport layer.
pub struct ListingService {
    executor: Arc<dyn QueryExecutor>,
    estimator: CountEstimator,
}

impl ListingService {
    pub fn new(executor: Arc<dyn QueryExecutor>, config: &Config) -> Self {
        Self {
            executor,
            estimator: CountEstimator::from_config(config),
        }
    }

    /// Offset-mode listing (V1): skip/take window plus exact total.
    pub async fn list(
        &self,
        criteria: &FilterCriteria,
        sort: SortSpec,
        window: OffsetWindow,
    ) -> EngineResult<OffsetPage> {
        let predicate = criteria.compile(SearchMode::Listing);
        offset::fetch_page(self.executor.as_ref(), &predicate, sort, window).await
    }

    /// Cursor-mode listing (V2): continuation token, no offset scan.
    pub async fn list_cursor(
        &self,
        criteria: &FilterCriteria,
        sort: SortSpec,
        window: &CursorWindow,
    ) -> EngineResult<CursorPage> {
        let predicate = criteria.compile(SearchMode::Listing);
        cursor::fetch_page(self.executor.as_ref(), &predicate, sort, window).await
    }

    /// Search entry path: like [`list_cursor`](Self::list_cursor) but a
    /// single-token title is normalized into a quoted phrase, forcing
    /// full-text dispatch.
    pub async fn search(
        &self,
        criteria: &FilterCriteria,
        sort: SortSpec,
        window: &CursorWindow,
    ) -> EngineResult<CursorPage> {
        let predicate = criteria.compile(SearchMode::Search);
        cursor::fetch_page(self.executor.as_ref(), &predicate, sort, window).await
    }

    /// Exact count of matching, non-deleted posts.
    pub async fn count(&self, criteria: &FilterCriteria) -> EngineResult<CountResult> {
        let predicate = criteria.compile(SearchMode::Listing);
        let total = self.executor.count_rows(&predicate).await?;
        Ok(CountResult {
            total,
            estimated: false,
        })
    }

    /// Count with estimation: statistics-derived when no filter is present
    /// and the hint passes the sanity policy, exact otherwise.
    pub async fn count_estimated(&self, criteria: &FilterCriteria) -> EngineResult<CountResult> {
        let predicate = criteria.compile(SearchMode::Listing);
        self.estimator.count(self.executor.as_ref(), &predicate).await
    }

    /// Look up a single non-deleted post with its author projection.
    ///
    /// A soft-deleted post is indistinguishable from a missing one: both
    /// are [`EngineError::NotFound`].
    pub async fn find_by_id(&self, id: i64) -> EngineResult<PostWithAuthor> {
        let mut predicate = Predicate::unconstrained();
        predicate.push(Clause::Equals {
            column: "id",
            value: ClauseValue::Int(id),
        });

        let fetch = RowFetch {
            predicate,
            sort: SortSpec {
                key: SortKey::Id,
                direction: SortDirection::Asc,
            },
            limit: 1,
            offset: 0,
            with_comment_count: false,
        };

        let mut rows = self.executor.fetch_rows(&fetch).await?;
        rows.pop().ok_or(EngineError::NotFound(id))
    }
}
