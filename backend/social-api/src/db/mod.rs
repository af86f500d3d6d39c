//! Database access layer
//!
//! - `Storage`: pool plus per-call deadline, shared by every repository
//! - `PostRepository`, `CommentRepository`, `UserRepository`, `FollowerRepository`
//! - `FeedQuery`: the filtered, paginated feed statement

pub mod comment_repo;
pub mod feed_query;
pub mod follower_repo;
pub mod post_repo;
pub mod user_repo;

pub use comment_repo::CommentRepository;
pub use feed_query::FeedQuery;
pub use follower_repo::FollowerRepository;
pub use post_repo::PostRepository;
pub use user_repo::UserRepository;

use crate::error::{AppError, Result};
use crate::metrics::queries::observe_query;
use sqlx::PgPool;
use std::future::Future;
use std::time::{Duration, Instant};

/// Connection pool together with the deadline applied to each storage call.
///
/// Built once at startup and cloned into every repository and handler.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: PgPool,
    query_timeout: Duration,
}

impl Storage {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run one storage call under the configured deadline.
    ///
    /// The call is abandoned once the deadline passes and reported as
    /// `AppError::Timeout`; sqlx errors go through `From<sqlx::Error>`.
    pub async fn timed<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.query_timeout, call).await;
        let elapsed = start.elapsed().as_secs_f64();

        match outcome {
            Ok(Ok(value)) => {
                observe_query(operation, "ok", elapsed);
                Ok(value)
            }
            Ok(Err(err)) => {
                observe_query(operation, "error", elapsed);
                Err(AppError::from(err))
            }
            Err(_) => {
                observe_query(operation, "timeout", elapsed);
                tracing::warn!(
                    operation,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "storage call exceeded deadline"
                );
                Err(AppError::Timeout(format!(
                    "{} exceeded {}ms",
                    operation,
                    self.query_timeout.as_millis()
                )))
            }
        }
    }

    /// Round-trip a trivial query; used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.timed("ping", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}
