//! Comment handlers

use crate::db::{CommentRepository, PostRepository, Storage};
use crate::error::Result;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    pub content: String,
}

/// Comment on a post
pub async fn create_comment(
    storage: web::Data<Storage>,
    caller: UserId,
    path: web::Path<i64>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let post_id = path.into_inner();

    // 404 for an unknown post rather than the FK violation's 400
    PostRepository::new(storage.get_ref().clone())
        .get_by_id(post_id)
        .await?;

    let comment = CommentRepository::new(storage.get_ref().clone())
        .create(post_id, caller.0, &req.content)
        .await?;

    tracing::info!(comment_id = comment.id, post_id, user_id = caller.0, "comment created");
    Ok(HttpResponse::Created().json(comment))
}

/// Comments of a post, oldest first
pub async fn list_comments(
    storage: web::Data<Storage>,
    _caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();

    PostRepository::new(storage.get_ref().clone())
        .get_by_id(post_id)
        .await?;

    let comments = CommentRepository::new(storage.get_ref().clone())
        .get_by_post_id(post_id)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}
