use crate::db::Storage;
use crate::error::Result;

/// Follow edges: `follower_id` follows `user_id`
#[derive(Debug, Clone)]
pub struct FollowerRepository {
    storage: Storage,
}

impl FollowerRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Idempotent follow; returns true if a new edge was inserted.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        let inserted = self
            .storage
            .timed(
                "follow",
                sqlx::query(
                    r#"
                    INSERT INTO followers (user_id, follower_id)
                    VALUES ($1, $2)
                    ON CONFLICT (user_id, follower_id) DO NOTHING
                    "#,
                )
                .bind(followed_id)
                .bind(follower_id)
                .execute(self.storage.pool()),
            )
            .await?
            .rows_affected();

        Ok(inserted > 0)
    }

    /// Idempotent unfollow; returns true if an edge was removed.
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        let removed = self
            .storage
            .timed(
                "unfollow",
                sqlx::query("DELETE FROM followers WHERE user_id = $1 AND follower_id = $2")
                    .bind(followed_id)
                    .bind(follower_id)
                    .execute(self.storage.pool()),
            )
            .await?
            .rows_affected();

        Ok(removed > 0)
    }
}
