use crate::db::{FeedQuery, Storage};
use crate::error::Result;
use crate::middleware::UserId;
use crate::pagination::FeedQueryParams;
use actix_web::{web, HttpResponse};

/// Feed of the caller's own posts and posts of users they follow.
///
/// Query parameters: `limit`, `offset`, `sort` (`asc`/`desc`), `search`,
/// `tags` (comma-separated). All are validated before any query runs.
pub async fn get_feed(
    storage: web::Data<Storage>,
    caller: UserId,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let params = query.parse()?;
    tracing::debug!(
        user_id = caller.0,
        limit = params.limit,
        offset = params.offset,
        sort = params.sort.as_sql(),
        tags = params.tags.len(),
        "loading feed"
    );

    let posts = FeedQuery::new(caller.0, params).fetch(&storage).await?;
    Ok(HttpResponse::Ok().json(posts))
}
