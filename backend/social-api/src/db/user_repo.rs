use chrono::{DateTime, Utc};

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::User;

/// Repository for user accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    storage: Storage,
}

impl UserRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Insert a user; a taken username or email is a conflict
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(i64, DateTime<Utc>)> {
        self.storage
            .timed(
                "user_create",
                sqlx::query_as::<_, (i64, DateTime<Utc>)>(
                    r#"
                    INSERT INTO users (username, email, password_hash)
                    VALUES ($1, $2, $3)
                    RETURNING id, created_at
                    "#,
                )
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .fetch_one(self.storage.pool()),
            )
            .await
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User> {
        self.storage
            .timed(
                "user_get",
                sqlx::query_as::<_, User>(
                    "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
                )
                .bind(user_id)
                .fetch_optional(self.storage.pool()),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))
    }

    /// Case-insensitive email lookup
    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.storage
            .timed(
                "user_get_by_email",
                sqlx::query_as::<_, User>(
                    r#"
                    SELECT id, username, email, password_hash, created_at
                    FROM users
                    WHERE LOWER(email) = LOWER($1)
                    "#,
                )
                .bind(email)
                .fetch_optional(self.storage.pool()),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    pub async fn exists(&self, user_id: i64) -> Result<bool> {
        self.storage
            .timed(
                "user_exists",
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                    .bind(user_id)
                    .fetch_one(self.storage.pool()),
            )
            .await
    }
}
