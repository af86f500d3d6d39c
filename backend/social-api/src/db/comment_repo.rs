use crate::db::Storage;
use crate::error::Result;
use crate::models::{Comment, CommentRow};

/// Repository for comments on posts
#[derive(Debug, Clone)]
pub struct CommentRepository {
    storage: Storage,
}

impl CommentRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Comments of a post, oldest first, each with its author's username
    pub async fn get_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>> {
        let rows = self
            .storage
            .timed(
                "comments_by_post",
                sqlx::query_as::<_, CommentRow>(
                    r#"
                    SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
                    FROM comments c
                    JOIN users u ON u.id = c.user_id
                    WHERE c.post_id = $1
                    ORDER BY c.created_at ASC, c.id ASC
                    "#,
                )
                .bind(post_id)
                .fetch_all(self.storage.pool()),
            )
            .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Insert a comment; an unknown post or author surfaces as a validation error
    pub async fn create(&self, post_id: i64, user_id: i64, content: &str) -> Result<Comment> {
        let row = self
            .storage
            .timed(
                "comment_create",
                sqlx::query_as::<_, CommentRow>(
                    r#"
                    WITH inserted AS (
                        INSERT INTO comments (post_id, user_id, content)
                        VALUES ($1, $2, $3)
                        RETURNING id, post_id, user_id, content, created_at
                    )
                    SELECT i.id, i.post_id, i.user_id, i.content, i.created_at, u.username
                    FROM inserted i
                    JOIN users u ON u.id = i.user_id
                    "#,
                )
                .bind(post_id)
                .bind(user_id)
                .bind(content)
                .fetch_one(self.storage.pool()),
            )
            .await?;

        Ok(Comment::from(row))
    }
}
