//! Count estimation with an exact-count backstop.
//!
//! With any filter present the count is always exact — selectivity makes
//! statistics meaningless. Unfiltered counts first try the store's
//! cardinality hint, which may be stale, zero, or negative; a value below
//! the sanity threshold, a lookup failure, or a blown deadline all fall
//! back to the exact count. The caller never observes the statistics path
//! failing: the approximate path is opportunistic, the exact path is the
//! guaranteed backstop.

use std::time::Duration;

use crate::config::Config;
use crate::error::EngineResult;
use crate::listing::filter::Predicate;
use crate::listing::types::CountResult;
use crate::store::{POST_TABLE, QueryExecutor};

/// Estimated/exact count decision procedure.
#[derive(Debug, Clone)]
pub struct CountEstimator {
    sanity_threshold: i64,
    statistics_timeout: Duration,
}

impl CountEstimator {
    pub fn new(sanity_threshold: i64, statistics_timeout: Duration) -> Self {
        Self {
            sanity_threshold,
            statistics_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.estimate_sanity_threshold, config.statistics_timeout())
    }

    /// Count rows matching the predicate, estimating when safe.
    pub async fn count(
        &self,
        executor: &dyn QueryExecutor,
        predicate: &Predicate,
    ) -> EngineResult<CountResult> {
        if !predicate.is_unconstrained() {
            return self.exact(executor, predicate).await;
        }

        // Deadline keeps a hung statistics lookup from blocking the
        // exact-count fallback.
        let statistics = tokio::time::timeout(
            self.statistics_timeout,
            executor.table_statistics(POST_TABLE),
        )
        .await;

        match statistics {
            Ok(Ok(estimate)) if estimate >= self.sanity_threshold => {
                tracing::warn!(estimate, "serving estimated post count; value may be stale");
                Ok(CountResult {
                    total: estimate as u64,
                    estimated: true,
                })
            }
            Ok(Ok(estimate)) => {
                tracing::warn!(
                    estimate,
                    threshold = self.sanity_threshold,
                    "statistics estimate below sanity threshold, falling back to exact count"
                );
                self.exact(executor, predicate).await
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "statistics lookup failed, falling back to exact count");
                self.exact(executor, predicate).await
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.statistics_timeout.as_millis() as u64,
                    "statistics lookup timed out, falling back to exact count"
                );
                self.exact(executor, predicate).await
            }
        }
    }

    async fn exact(
        &self,
        executor: &dyn QueryExecutor,
        predicate: &Predicate,
    ) -> EngineResult<CountResult> {
        let total = executor.count_rows(predicate).await?;
        Ok(CountResult {
            total,
            estimated: false,
        })
    }
}
