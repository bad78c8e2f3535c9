#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`MemoryExecutor`] implements the real [`QueryExecutor`] seam over an
//! in-memory post list, evaluating compiled predicates directly. This lets
//! the suite exercise the actual paginator/estimator/service code without a
//! database.

#![allow(dead_code)]

use std::cmp::Ordering;

use anyhow::{Result, bail};
use async_trait::async_trait;

use veduta_engine::listing::{
    Clause, ClauseValue, IneqOp, Predicate, SortDirection, SortKey, SortSpec,
};
use veduta_engine::models::post::{PostKind, PostStatus, PostWithAuthor};
use veduta_engine::store::{QueryExecutor, RowFetch};

/// How the statistics lookup should behave.
pub enum Statistics {
    Value(i64),
    Fails,
    Hangs,
}

/// A stored post: the listing row plus its soft-deletion state.
pub struct StoredPost {
    pub row: PostWithAuthor,
    pub deleted: bool,
}

impl StoredPost {
    pub fn with_content(mut self, content: &str) -> Self {
        self.row.content = Some(content.to_string());
        self
    }

    pub fn with_author(mut self, id: i64, name: &str) -> Self {
        self.row.author_id = id;
        self.row.author_name = Some(name.to_string());
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.row.status = status;
        self
    }

    pub fn with_kind(mut self, kind: PostKind) -> Self {
        self.row.kind = kind;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Build a published post; `created`/`changed` track the id so timestamp
/// sorts agree with id order.
pub fn post(id: i64, title: &str) -> StoredPost {
    StoredPost {
        row: PostWithAuthor {
            id,
            title: title.to_string(),
            content: None,
            status: PostStatus::Published,
            kind: PostKind::Normal,
            author_id: 1,
            created: 1_700_000_000 + id,
            changed: 1_700_000_000 + id,
            author_name: Some("ada".to_string()),
            comment_count: Some(0),
        },
        deleted: false,
    }
}

/// In-memory query executor.
pub struct MemoryExecutor {
    pub posts: Vec<StoredPost>,
    pub statistics: Statistics,
    /// Simulate a backend failure on every row fetch and count.
    pub fail_queries: bool,
}

impl MemoryExecutor {
    pub fn new(posts: Vec<StoredPost>) -> Self {
        Self {
            posts,
            statistics: Statistics::Value(0),
            fail_queries: false,
        }
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    fn matching(&self, predicate: &Predicate) -> Vec<PostWithAuthor> {
        self.posts
            .iter()
            .filter(|post| predicate.clauses().iter().all(|c| eval_clause(c, post)))
            .map(|post| post.row.clone())
            .collect()
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn fetch_rows(&self, fetch: &RowFetch) -> Result<Vec<PostWithAuthor>> {
        if self.fail_queries {
            bail!("connection reset by store");
        }

        let mut rows = self.matching(&fetch.predicate);
        sort_rows(&mut rows, fetch.sort);

        let rows = rows
            .into_iter()
            .skip(fetch.offset as usize)
            .take(fetch.limit as usize)
            .map(|mut row| {
                if !fetch.with_comment_count {
                    row.comment_count = None;
                }
                row
            })
            .collect();

        Ok(rows)
    }

    async fn count_rows(&self, predicate: &Predicate) -> Result<u64> {
        if self.fail_queries {
            bail!("connection reset by store");
        }
        Ok(self.matching(predicate).len() as u64)
    }

    async fn table_statistics(&self, _table: &str) -> Result<i64> {
        match self.statistics {
            Statistics::Value(v) => Ok(v),
            Statistics::Fails => bail!("statistics backend unavailable"),
            Statistics::Hangs => std::future::pending().await,
        }
    }
}

fn eval_clause(clause: &Clause, post: &StoredPost) -> bool {
    let row = &post.row;
    match clause {
        Clause::NotDeleted => !post.deleted,
        Clause::Equals { column, value } => match (*column, value) {
            ("id", ClauseValue::Int(id)) => row.id == *id,
            ("status", ClauseValue::Text(s)) => row.status.as_str() == s,
            ("type", ClauseValue::Text(s)) => row.kind.as_str() == s,
            _ => false,
        },
        Clause::TitlePrefix { prefix } => row.title.starts_with(prefix.as_str()),
        Clause::AuthorNamePrefix { prefix } => row
            .author_name
            .as_deref()
            .is_some_and(|name| name.starts_with(prefix.as_str())),
        Clause::FullText { query } => {
            // Word-level match over title + content, approximating the
            // store's natural-language semantics.
            let haystack = format!(
                "{} {}",
                row.title,
                row.content.as_deref().unwrap_or_default()
            )
            .to_lowercase();
            let words: Vec<&str> = haystack
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .collect();
            let sanitized = query.to_lowercase();
            let mut terms = sanitized
                .split(|c: char| !c.is_alphanumeric())
                .filter(|t| !t.is_empty())
                .peekable();
            terms.peek().is_some() && terms.all(|term| words.contains(&term))
        }
        Clause::Inequality { column, op, value } => {
            let ord = match (*column, value) {
                ("id", ClauseValue::Int(bound)) => row.id.cmp(bound),
                ("created", ClauseValue::Int(bound)) => row.created.cmp(bound),
                ("changed", ClauseValue::Int(bound)) => row.changed.cmp(bound),
                ("title", ClauseValue::Text(bound)) => row.title.as_str().cmp(bound.as_str()),
                _ => return false,
            };
            match op {
                IneqOp::Gt => ord == Ordering::Greater,
                IneqOp::Lt => ord == Ordering::Less,
            }
        }
    }
}

fn sort_rows(rows: &mut [PostWithAuthor], sort: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = match sort.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::CreatedAt => a.created.cmp(&b.created),
            SortKey::UpdatedAt => a.changed.cmp(&b.changed),
        };
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
