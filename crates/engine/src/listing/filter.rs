//! Filter compilation and search dispatch.
//!
//! Turns [`FilterCriteria`] into a store-agnostic [`Predicate`]: a flat
//! conjunction of tagged clauses that a store-specific translator renders
//! into its query language. Compilation is pure and infallible — absent
//! criteria simply contribute no clause — and the soft-delete exclusion is
//! always present.

use super::types::{FilterCriteria, SearchMode};

/// A bound clause value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    Int(i64),
    Text(String),
}

/// Inequality operator for cursor continuation clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneqOp {
    Gt,
    Lt,
}

/// One conjunct of a compiled predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `post.deleted IS NULL`. Present in every predicate.
    NotDeleted,

    /// `post.<column> = value`.
    Equals {
        column: &'static str,
        value: ClauseValue,
    },

    /// `post.title LIKE 'prefix%'` (wildcards escaped by the translator).
    TitlePrefix { prefix: String },

    /// Natural-language full-text match over title and content.
    FullText { query: String },

    /// `author.name LIKE 'prefix%'` through the author join. Relational;
    /// the full author record is never loaded.
    AuthorNamePrefix { prefix: String },

    /// `post.<column> > bound` / `< bound` — cursor continuation.
    Inequality {
        column: &'static str,
        op: IneqOp,
        value: ClauseValue,
    },
}

/// Conjunctive predicate over post rows. Clauses compose independently;
/// there is no OR across fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The always-present baseline: soft-deleted rows excluded, nothing
    /// else constrained.
    pub fn unconstrained() -> Self {
        Self {
            clauses: vec![Clause::NotDeleted],
        }
    }

    /// Append a clause (AND semantics).
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True when only the soft-delete exclusion is present. Only such
    /// predicates are eligible for statistics-based count estimation.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.iter().all(|c| matches!(c, Clause::NotDeleted))
    }

    /// Whether rendering this predicate needs the author join.
    pub fn requires_author_join(&self) -> bool {
        self.clauses
            .iter()
            .any(|c| matches!(c, Clause::AuthorNamePrefix { .. }))
    }
}

impl FilterCriteria {
    /// Compile criteria into a conjunctive predicate.
    pub fn compile(&self, mode: SearchMode) -> Predicate {
        let mut predicate = Predicate::unconstrained();

        if let Some(title) = self.title.as_deref() {
            predicate.push(dispatch_title(title, mode));
        }
        if let Some(author_name) = &self.author_name {
            predicate.push(Clause::AuthorNamePrefix {
                prefix: author_name.clone(),
            });
        }
        if let Some(status) = self.status {
            predicate.push(Clause::Equals {
                column: "status",
                value: ClauseValue::Text(status.as_str().to_string()),
            });
        }
        if let Some(kind) = self.kind {
            predicate.push(Clause::Equals {
                column: "type",
                value: ClauseValue::Text(kind.as_str().to_string()),
            });
        }

        predicate
    }
}

/// Decide predicate shape for a title filter.
///
/// Phrase-like input (any whitespace) gets a full-text relevance clause
/// over title and content; a single token gets a cheap prefix clause on the
/// title alone. The search entry path wraps a bare single token in quotes
/// first, so one-word search queries still take the full-text path.
fn dispatch_title(raw: &str, mode: SearchMode) -> Clause {
    let term = match mode {
        SearchMode::Search if !raw.contains(char::is_whitespace) && !raw.starts_with('"') => {
            format!("\"{raw}\"")
        }
        _ => raw.to_string(),
    };

    if term.contains(char::is_whitespace) || term.starts_with('"') {
        Clause::FullText { query: term }
    } else {
        Clause::TitlePrefix { prefix: term }
    }
}
