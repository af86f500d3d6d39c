//! Feed statement construction.
//!
//! One parameterized statement joins posts, authors, follow edges and comment
//! counts. User input only ever reaches the statement as bound parameters;
//! the sort keyword comes from `SortDirection::as_sql`.

use sqlx::{Postgres, QueryBuilder};

use crate::db::Storage;
use crate::error::Result;
use crate::models::{FeedRow, PostWithMetadata};
use crate::pagination::PaginatedFeedQuery;

const FEED_SELECT: &str = r#"
SELECT p.id, p.user_id, p.title, p.content, p.tags, p.version,
       p.created_at, p.updated_at, u.username,
       COUNT(c.id) AS comments_count
FROM posts p
JOIN users u ON u.id = p.user_id
LEFT JOIN comments c ON c.post_id = p.id
WHERE "#;

/// Feed of `user_id`: own posts plus posts of followed users
#[derive(Debug, Clone)]
pub struct FeedQuery {
    user_id: i64,
    params: PaginatedFeedQuery,
}

impl FeedQuery {
    pub fn new(user_id: i64, params: PaginatedFeedQuery) -> Self {
        Self { user_id, params }
    }

    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(FEED_SELECT);

        builder
            .push("(p.user_id = ")
            .push_bind(self.user_id)
            .push(" OR p.user_id IN (SELECT user_id FROM followers WHERE follower_id = ")
            .push_bind(self.user_id)
            .push("))");

        if let Some(search) = &self.params.search {
            let pattern = format!("%{}%", escape_like(search));
            builder
                .push(" AND (p.title ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR p.content ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }

        if !self.params.tags.is_empty() {
            builder
                .push(" AND p.tags @> ")
                .push_bind(self.params.tags.clone())
                .push("::text[]");
        }

        let direction = self.params.sort.as_sql();
        builder
            .push(" GROUP BY p.id, u.username")
            .push(format!(
                " ORDER BY p.created_at {dir}, p.id {dir}",
                dir = direction
            ))
            .push(" LIMIT ")
            .push_bind(self.params.limit)
            .push(" OFFSET ")
            .push_bind(self.params.offset);

        builder
    }

    pub async fn fetch(&self, storage: &Storage) -> Result<Vec<PostWithMetadata>> {
        let mut builder = self.build();
        let rows = storage
            .timed(
                "feed",
                builder.build_query_as::<FeedRow>().fetch_all(storage.pool()),
            )
            .await?;

        Ok(rows.into_iter().map(PostWithMetadata::from).collect())
    }
}

/// Escape LIKE metacharacters so the search text matches literally
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
