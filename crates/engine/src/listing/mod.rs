//! Listing engine module.
//!
//! This module provides:
//! - FilterCriteria compilation into store-agnostic predicates
//! - OffsetPaginator (V1) and CursorPaginator (V2)
//! - CountEstimator: statistics-derived counts with an exact backstop
//! - ListingService: the request-level orchestration layer

pub mod cursor;
pub mod estimator;
pub mod filter;
pub mod offset;
mod service;
pub mod types;

pub use estimator::CountEstimator;
pub use filter::{Clause, ClauseValue, IneqOp, Predicate};
pub use service::ListingService;
pub use types::{
    CountResult, CursorPage, CursorToken, CursorWindow, FilterCriteria, MAX_PAGE_SIZE, OffsetPage,
    OffsetWindow, SearchMode, SortDirection, SortKey, SortSpec,
};
