//! PostgreSQL query executor using SeaQuery.
//!
//! Renders compiled predicates into SQL and executes them with sqlx. The
//! post table is expected to carry a `search_vector` tsvector column
//! maintained over title and content; full-text clauses match against it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_query::{
    Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};
use sqlx::PgPool;

use super::{POST_TABLE, QueryExecutor, RowFetch};
use crate::listing::filter::{Clause, ClauseValue, IneqOp, Predicate};
use crate::listing::types::SortDirection;
use crate::models::post::PostWithAuthor;

/// Joined author table.
const AUTHOR_TABLE: &str = "author";

/// Post columns selected for listing rows.
const POST_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "content",
    "status",
    "type",
    "author_id",
    "created",
    "changed",
];

/// Query executor backed by a PostgreSQL pool.
pub struct PgQueryExecutor {
    pool: PgPool,
}

impl PgQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    async fn fetch_rows(&self, fetch: &RowFetch) -> Result<Vec<PostWithAuthor>> {
        let sql = build_select_sql(fetch);
        let rows = sqlx::query_as::<_, PostWithAuthor>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch post rows")?;

        Ok(rows)
    }

    async fn count_rows(&self, predicate: &Predicate) -> Result<u64> {
        let sql = build_count_sql(predicate);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .context("failed to count post rows")?;

        Ok(count.max(0) as u64)
    }

    async fn table_statistics(&self, table: &str) -> Result<i64> {
        // Planner statistics, not a live scan. Stale or -1 until analyzed.
        let estimate: i64 =
            sqlx::query_scalar("SELECT reltuples::BIGINT FROM pg_class WHERE relname = $1")
                .bind(table)
                .fetch_one(&self.pool)
                .await
                .context("failed to read table statistics")?;

        Ok(estimate)
    }
}

/// Build the listing SELECT with author join, ordering, and windowing.
pub fn build_select_sql(fetch: &RowFetch) -> String {
    let mut query = Query::select();

    for column in POST_COLUMNS {
        query.column((Alias::new(POST_TABLE), Alias::new(column)));
    }
    query.expr_as(
        Expr::col((Alias::new(AUTHOR_TABLE), Alias::new("name"))),
        Alias::new("author_name"),
    );
    if fetch.with_comment_count {
        query.expr_as(
            Expr::cust(
                "(SELECT COUNT(*) FROM comment \
                 WHERE comment.post_id = post.id AND comment.deleted IS NULL)",
            ),
            Alias::new("comment_count"),
        );
    }

    query.from(Alias::new(POST_TABLE));
    add_author_join(&mut query);
    add_clauses(&mut query, &fetch.predicate);

    let order = match fetch.sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    query.order_by(
        (Alias::new(POST_TABLE), Alias::new(fetch.sort.key.column())),
        order,
    );

    query.limit(fetch.limit);
    query.offset(fetch.offset);

    query.to_string(PostgresQueryBuilder)
}

/// Build the COUNT query. The author join is rendered only when the
/// predicate references the author table.
pub fn build_count_sql(predicate: &Predicate) -> String {
    let mut query = Query::select();

    query.expr(Expr::col(Asterisk).count());
    query.from(Alias::new(POST_TABLE));
    if predicate.requires_author_join() {
        add_author_join(&mut query);
    }
    add_clauses(&mut query, predicate);

    query.to_string(PostgresQueryBuilder)
}

fn add_author_join(query: &mut SelectStatement) {
    query.left_join(
        Alias::new(AUTHOR_TABLE),
        Expr::col((Alias::new(POST_TABLE), Alias::new("author_id")))
            .equals((Alias::new(AUTHOR_TABLE), Alias::new("id"))),
    );
}

fn add_clauses(query: &mut SelectStatement, predicate: &Predicate) {
    for clause in predicate.clauses() {
        if let Some(condition) = translate_clause(clause) {
            query.and_where(condition);
        }
    }
}

/// Render one predicate clause.
fn translate_clause(clause: &Clause) -> Option<SimpleExpr> {
    match clause {
        Clause::NotDeleted => Some(post_col("deleted").is_null()),
        Clause::Equals { column, value } => Some(match value {
            ClauseValue::Int(i) => post_col(column).eq(*i),
            ClauseValue::Text(s) => post_col(column).eq(s.clone()),
        }),
        Clause::TitlePrefix { prefix } => {
            Some(post_col("title").like(format!("{}%", escape_like_wildcards(prefix))))
        }
        Clause::AuthorNamePrefix { prefix } => Some(
            Expr::col((Alias::new(AUTHOR_TABLE), Alias::new("name")))
                .like(format!("{}%", escape_like_wildcards(prefix))),
        ),
        Clause::FullText { query } => {
            // Sanitize: keep only alphanumeric + spaces, then join with &
            let sanitized: String = query
                .chars()
                .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
                .collect();
            let terms: Vec<&str> = sanitized.split_whitespace().collect();
            if terms.is_empty() {
                return None;
            }
            let tsquery = terms.join(" & ");
            // Parameterized to prevent SQL injection
            Some(Expr::cust_with_values(
                "post.search_vector @@ to_tsquery('english', $1)",
                [tsquery],
            ))
        }
        Clause::Inequality { column, op, value } => {
            let col = post_col(column);
            Some(match (op, value) {
                (IneqOp::Gt, ClauseValue::Int(i)) => col.gt(*i),
                (IneqOp::Gt, ClauseValue::Text(s)) => col.gt(s.clone()),
                (IneqOp::Lt, ClauseValue::Int(i)) => col.lt(*i),
                (IneqOp::Lt, ClauseValue::Text(s)) => col.lt(s.clone()),
            })
        }
    }
}

fn post_col(column: &str) -> Expr {
    Expr::col((Alias::new(POST_TABLE), Alias::new(column)))
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
