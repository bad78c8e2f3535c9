//! Post record types.
//!
//! Posts are the listed entity: scalar fields, an author reference, unix
//! timestamps, and a soft-deletion timestamp. A post whose `deleted` column
//! is non-null is excluded from every listing, count, and estimate; the
//! filter compiler adds that clause unconditionally, so listing row shapes
//! here never carry the column.

use serde::{Deserialize, Serialize};

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "post_status", rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
            PostStatus::Archived => "ARCHIVED",
        }
    }
}

/// Post kind (stored in the `type` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "post_type", rename_all = "UPPERCASE")]
pub enum PostKind {
    Normal,
    Notice,
    Event,
}

impl PostKind {
    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Normal => "NORMAL",
            PostKind::Notice => "NOTICE",
            PostKind::Event => "EVENT",
        }
    }
}

/// Author projection joined into listing rows.
///
/// Only id and name are ever selected; the full author record is never
/// loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: i64,
    pub name: Option<String>,
}

/// Post row as returned by listings: the post scalars plus the author
/// projection and, for offset-mode listings, a derived comment count.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    /// Unique identifier (monotonic).
    pub id: i64,

    /// Post title.
    pub title: String,

    /// Free-text body.
    pub content: Option<String>,

    /// Publication status.
    pub status: PostStatus,

    /// Post kind.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: PostKind,

    /// Author user ID.
    pub author_id: i64,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,

    /// Author display name (joined through `author_id`).
    pub author_name: Option<String>,

    /// Number of non-deleted comments, when the listing requested it.
    #[sqlx(default)]
    pub comment_count: Option<i64>,
}

impl PostWithAuthor {
    /// The joined author projection.
    pub fn author(&self) -> AuthorRef {
        AuthorRef {
            id: self.author_id,
            name: self.author_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PostWithAuthor {
        PostWithAuthor {
            id: 7,
            title: "hello".to_string(),
            content: None,
            status: PostStatus::Published,
            kind: PostKind::Normal,
            author_id: 3,
            created: 1_700_000_000,
            changed: 1_700_000_100,
            author_name: Some("ada".to_string()),
            comment_count: None,
        }
    }

    #[test]
    fn author_projection() {
        let row = sample();
        let author = row.author();
        assert_eq!(author.id, 3);
        assert_eq!(author.name.as_deref(), Some("ada"));
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&PostStatus::Published).unwrap();
        assert_eq!(json, "\"PUBLISHED\"");
        let parsed: PostStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PostStatus::Published);
    }

    #[test]
    fn kind_field_renames_to_type() {
        let row = sample();
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "NORMAL");
        assert!(value.get("kind").is_none());
    }
}
