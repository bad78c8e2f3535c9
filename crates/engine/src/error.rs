//! Engine error types.

use thiserror::Error;

/// Errors surfaced to callers of the listing engine.
///
/// Statistics-lookup failures are deliberately absent: the count estimator
/// recovers from them locally and they never cross this boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No non-deleted post exists with this id. Soft-deleted posts are
    /// indistinguishable from missing ones.
    #[error("post {0} not found")]
    NotFound(i64),

    /// Sort column outside the allow-list. Rejected before any store access.
    #[error("invalid sort column: {0}")]
    InvalidSort(String),

    /// A row fetch or exact-count query failed. Propagated unmodified; the
    /// engine performs no retries.
    #[error("store failure")]
    Store(#[from] anyhow::Error),
}

/// Result type alias using EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
