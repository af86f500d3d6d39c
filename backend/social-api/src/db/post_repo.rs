use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::{Post, PostVersion};

const POST_COLUMNS: &str = "id, user_id, title, content, tags, version, created_at, updated_at";

/// Repository for versioned posts
#[derive(Debug, Clone)]
pub struct PostRepository {
    storage: Storage,
}

impl PostRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Insert a post at version 0
    pub async fn create(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<Post> {
        let sql = format!(
            "INSERT INTO posts (user_id, title, content, tags) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            POST_COLUMNS
        );
        let post = self
            .storage
            .timed(
                "post_create",
                sqlx::query_as::<_, Post>(&sql)
                    .bind(user_id)
                    .bind(title)
                    .bind(content)
                    .bind(tags)
                    .fetch_one(self.storage.pool()),
            )
            .await?;

        tracing::debug!(post_id = post.id, user_id, "post created");
        Ok(post)
    }

    pub async fn get_by_id(&self, post_id: i64) -> Result<Post> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        self.storage
            .timed(
                "post_get",
                sqlx::query_as::<_, Post>(&sql)
                    .bind(post_id)
                    .fetch_optional(self.storage.pool()),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
    }

    /// Compare-and-swap update on `version`.
    ///
    /// Succeeds only when the stored version still equals `expected_version`;
    /// the version then moves up by exactly one. When nothing matched, a
    /// second lookup tells a missing post apart from a stale version.
    pub async fn update(
        &self,
        post_id: i64,
        title: &str,
        content: &str,
        expected_version: i32,
    ) -> Result<PostVersion> {
        let updated = self
            .storage
            .timed(
                "post_update",
                sqlx::query_as::<_, PostVersion>(
                    r#"
                    UPDATE posts
                    SET title = $1, content = $2, version = version + 1, updated_at = NOW()
                    WHERE id = $3 AND version = $4
                    RETURNING id, version, updated_at
                    "#,
                )
                .bind(title)
                .bind(content)
                .bind(post_id)
                .bind(expected_version)
                .fetch_optional(self.storage.pool()),
            )
            .await?;

        if let Some(version) = updated {
            return Ok(version);
        }

        let current: Option<i32> = self
            .storage
            .timed(
                "post_version_lookup",
                sqlx::query_scalar::<_, i32>("SELECT version FROM posts WHERE id = $1")
                    .bind(post_id)
                    .fetch_optional(self.storage.pool()),
            )
            .await?;

        match current {
            None => Err(AppError::NotFound(format!("post {} not found", post_id))),
            Some(current) => {
                tracing::info!(
                    post_id,
                    expected_version,
                    current_version = current,
                    "rejected stale post update"
                );
                Err(AppError::Conflict(format!(
                    "post {} was modified concurrently (expected version {}, found {})",
                    post_id, expected_version, current
                )))
            }
        }
    }

    pub async fn delete(&self, post_id: i64) -> Result<()> {
        let result = self
            .storage
            .timed(
                "post_delete",
                sqlx::query("DELETE FROM posts WHERE id = $1")
                    .bind(post_id)
                    .execute(self.storage.pool()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {} not found", post_id)));
        }
        Ok(())
    }
}
