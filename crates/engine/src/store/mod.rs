//! Query-execution interface.
//!
//! The engine never talks to a database directly; it hands structured
//! fetches to a [`QueryExecutor`] and lets the implementation translate
//! them. [`pg`] is the production PostgreSQL implementation; tests supply
//! an in-memory one.

pub mod pg;

use anyhow::Result;
use async_trait::async_trait;

use crate::listing::filter::Predicate;
use crate::listing::types::SortSpec;
use crate::models::post::PostWithAuthor;

/// Table the engine lists. Also the key for statistics lookups.
pub const POST_TABLE: &str = "post";

/// A predicate-constrained row fetch with ordering and windowing.
#[derive(Debug, Clone)]
pub struct RowFetch {
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub limit: u64,
    pub offset: u64,
    /// Project a derived per-row comment count (offset-mode listings).
    pub with_comment_count: bool,
}

/// Read-only access to the row store.
///
/// Implementations provide whatever concurrency discipline the store
/// requires; the engine issues no locks or transactions of its own and
/// never retries a failed call.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Fetch post rows with the author projection joined in.
    async fn fetch_rows(&self, fetch: &RowFetch) -> Result<Vec<PostWithAuthor>>;

    /// Count rows matching a predicate. No author projection; the join is
    /// only rendered when the predicate itself needs it.
    async fn count_rows(&self, predicate: &Predicate) -> Result<u64>;

    /// Store-maintained cardinality hint for a table. May be stale, zero,
    /// or negative; callers must treat it as untrusted.
    async fn table_statistics(&self, table: &str) -> Result<i64>;
}
