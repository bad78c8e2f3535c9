//! Cursor pagination (strategy V2).
//!
//! Windows by an inequality bound on the last seen sort value instead of an
//! offset scan, so cost is independent of page depth given an index on the
//! sort column. Fetches one probe row past the page size to learn whether
//! more pages exist without a second query. Strictly forward-only; there is
//! no previous-page cursor in this design.

use crate::error::EngineResult;
use crate::listing::filter::{Clause, ClauseValue, IneqOp, Predicate};
use crate::listing::types::{CursorPage, CursorToken, CursorWindow, SortDirection, SortKey, SortSpec};
use crate::store::{QueryExecutor, RowFetch};

/// Fetch one cursor-mode page.
pub async fn fetch_page(
    executor: &dyn QueryExecutor,
    predicate: &Predicate,
    sort: SortSpec,
    window: &CursorWindow,
) -> EngineResult<CursorPage> {
    let mut predicate = predicate.clone();
    if let Some(cursor) = &window.cursor {
        predicate.push(continuation_clause(cursor, sort));
    }

    // One extra row to detect more-pages-available.
    let fetch = RowFetch {
        predicate,
        sort,
        limit: u64::from(window.limit) + 1,
        offset: 0,
        with_comment_count: false,
    };

    let mut rows = executor.fetch_rows(&fetch).await?;

    let has_more = rows.len() > window.limit as usize;
    if has_more {
        rows.truncate(window.limit as usize);
    }
    // When the page size exactly exhausts the result set, the probe row is
    // absent and has_more correctly stays false.
    let next_cursor = if has_more {
        rows.last().map(|row| CursorToken::new(sort.key.sort_value(row)))
    } else {
        None
    };

    Ok(CursorPage::new(rows, next_cursor, has_more))
}

/// Inequality clause continuing past the cursor: `>` when ascending, `<`
/// when descending.
fn continuation_clause(cursor: &CursorToken, sort: SortSpec) -> Clause {
    let op = match sort.direction {
        SortDirection::Asc => IneqOp::Gt,
        SortDirection::Desc => IneqOp::Lt,
    };

    Clause::Inequality {
        column: sort.key.column(),
        op,
        value: decode_cursor(sort.key, cursor),
    }
}

/// Decode a cursor token into a typed bound for its sort column.
///
/// A token that fails to parse for a numeric column binds as text instead:
/// tokens carry no signature tying them to the parameters that produced
/// them, so a stale or foreign token yields positionally undefined results
/// rather than an error.
fn decode_cursor(key: SortKey, cursor: &CursorToken) -> ClauseValue {
    match key {
        SortKey::Title => ClauseValue::Text(cursor.as_str().to_string()),
        SortKey::Id | SortKey::CreatedAt | SortKey::UpdatedAt => cursor
            .as_str()
            .parse::<i64>()
            .map(ClauseValue::Int)
            .unwrap_or_else(|_| ClauseValue::Text(cursor.as_str().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_sort_continues_with_greater_than() {
        let sort = SortSpec {
            key: SortKey::Id,
            direction: SortDirection::Asc,
        };
        let clause = continuation_clause(&CursorToken::new("4"), sort);

        assert_eq!(
            clause,
            Clause::Inequality {
                column: "id",
                op: IneqOp::Gt,
                value: ClauseValue::Int(4),
            }
        );
    }

    #[test]
    fn descending_sort_continues_with_less_than() {
        let sort = SortSpec {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        };
        let clause = continuation_clause(&CursorToken::new("1700000000"), sort);

        assert_eq!(
            clause,
            Clause::Inequality {
                column: "created",
                op: IneqOp::Lt,
                value: ClauseValue::Int(1_700_000_000),
            }
        );
    }

    #[test]
    fn title_cursor_stays_textual() {
        let value = decode_cursor(SortKey::Title, &CursorToken::new("zebra"));
        assert_eq!(value, ClauseValue::Text("zebra".to_string()));
    }

    #[test]
    fn unparseable_numeric_cursor_degrades_to_text() {
        let value = decode_cursor(SortKey::Id, &CursorToken::new("not-a-number"));
        assert_eq!(value, ClauseValue::Text("not-a-number".to_string()));
    }
}
