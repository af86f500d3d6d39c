//! Data models for the social API
//!
//! - `User`: registered account
//! - `Post`: versioned post owned by its author, comments loaded on demand
//! - `Comment`: comment on a post, with its author's username
//! - `PostWithMetadata`: feed projection of a post plus author and comment count

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Author summary embedded in comments and feed rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user: Author,
}

/// Flat row shape of `Comment` as returned by the joined comment queries
#[derive(Debug, FromRow)]
pub(crate) struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            user: Author {
                id: row.user_id,
                username: row.username,
            },
        }
    }
}

/// Read-only feed projection; `comments_count` is aggregated, never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithMetadata {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Author,
    pub comments_count: i64,
}

#[derive(Debug, FromRow)]
pub(crate) struct FeedRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub comments_count: i64,
}

impl From<FeedRow> for PostWithMetadata {
    fn from(row: FeedRow) -> Self {
        PostWithMetadata {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            tags: row.tags,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: Author {
                id: row.user_id,
                username: row.username,
            },
            comments_count: row.comments_count,
        }
    }
}

/// Result of a successful optimistic update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostVersion {
    pub id: i64,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}
