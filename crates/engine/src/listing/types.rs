//! Listing engine types.
//!
//! Request-scoped value objects: filter criteria, sort specification,
//! pagination windows, cursor tokens, and the result shapes handed back to
//! the transport layer. Nothing here survives beyond one request.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::post::{PostKind, PostStatus, PostWithAuthor};

/// Largest allowed page size for either pagination style.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter criteria for post listings. All fields are independently
/// optional; an absent field imposes no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Title filter. Whitespace inside the value switches the compiled
    /// predicate from prefix match to full-text match.
    pub title: Option<String>,

    /// Author display-name prefix, matched through the author join.
    pub author_name: Option<String>,

    /// Publication status.
    pub status: Option<PostStatus>,

    /// Post kind.
    pub kind: Option<PostKind>,
}

impl FilterCriteria {
    /// True when no criterion is set. Only unfiltered counts are eligible
    /// for estimation.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author_name.is_none()
            && self.status.is_none()
            && self.kind.is_none()
    }
}

/// How a title filter should be dispatched.
///
/// `Search` is the dedicated search entry path: a single unquoted token is
/// normalized into a quoted phrase before dispatch, forcing full-text mode
/// even for one-word queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Listing,
    Search,
}

/// Sort columns cursor pagination can encode losslessly. Closed
/// enumeration; anything else is rejected before the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl SortKey {
    /// Parse a caller-supplied sort key. Accepts snake_case and camelCase
    /// spellings of the allow-list.
    pub fn parse(raw: &str) -> EngineResult<Self> {
        match raw {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "created_at" | "createdAt" => Ok(SortKey::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortKey::UpdatedAt),
            other => Err(EngineError::InvalidSort(other.to_string())),
        }
    }

    /// Column this key maps to. Explicit mapping, no dynamic field access.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::CreatedAt => "created",
            SortKey::UpdatedAt => "changed",
        }
    }

    /// Stringify the sort-column value of a row, for cursor minting.
    pub fn sort_value(&self, row: &PostWithAuthor) -> String {
        match self {
            SortKey::Id => row.id.to_string(),
            SortKey::Title => row.title.clone(),
            SortKey::CreatedAt => row.created.to_string(),
            SortKey::UpdatedAt => row.changed.to_string(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Complete sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first, matching the listing default.
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Offset-mode page window: 1-based page number and page size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OffsetWindow {
    pub page: u32,
    pub limit: u32,
}

impl OffsetWindow {
    /// Build a window, clamping page to ≥ 1 and limit to 1..=100.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows the store must skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Cursor-mode page window: page size and optional continuation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorWindow {
    pub limit: u32,
    pub cursor: Option<CursorToken>,
}

impl CursorWindow {
    /// Build a window, clamping limit to 1..=100.
    pub fn new(limit: u32, cursor: Option<CursorToken>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            cursor,
        }
    }
}

/// Opaque continuation marker: the string form of the sort-column value of
/// the last row of the previous page. Client-held, never persisted
/// server-side, and only meaningful with the same filter and sort that
/// produced it — reuse under changed parameters yields positionally
/// undefined results, by contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Offset-mode listing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetPage {
    /// Rows for this page, each with the author projection.
    pub data: Vec<PostWithAuthor>,

    /// Total matching rows (exact).
    pub total: u64,

    /// Current page number (1-indexed).
    pub page: u32,

    /// Page size.
    pub limit: u32,

    /// Last page number: ceil(total / limit).
    pub last_page: u32,
}

impl OffsetPage {
    /// Assemble a page with paging math applied. A page past the end keeps
    /// the true total alongside its empty row list.
    pub fn new(data: Vec<PostWithAuthor>, total: u64, window: OffsetWindow) -> Self {
        let last_page = if window.limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(window.limit)) as u32
        };

        Self {
            data,
            total,
            page: window.page,
            limit: window.limit,
            last_page,
        }
    }
}

/// Cursor-mode listing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage {
    /// Rows for this page, each with the author projection.
    pub data: Vec<PostWithAuthor>,

    /// Continuation token, absent when no further pages exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<CursorToken>,

    /// Whether a further matching row existed at fetch time.
    pub has_more: bool,

    /// Number of rows returned.
    pub count: usize,
}

impl CursorPage {
    /// Assemble a cursor page; `count` is derived from the rows.
    pub fn new(data: Vec<PostWithAuthor>, next_cursor: Option<CursorToken>, has_more: bool) -> Self {
        let count = data.len();
        Self {
            data,
            next_cursor,
            has_more,
            count,
        }
    }
}

/// Count result: total plus whether it came from statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResult {
    pub total: u64,
    pub estimated: bool,
}
