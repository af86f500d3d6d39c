//! Post handlers - HTTP endpoints for post operations

use crate::db::{CommentRepository, PostRepository, Storage};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::Post;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::collections::HashSet;
use validator::Validate;

pub const MAX_POST_TAGS: usize = 10;
pub const MAX_POST_TAG_CHARS: usize = 50;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update; omitted fields keep their stored value.
/// `version` is required and must match the stored version.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "content must be 1-1000 characters"))]
    pub content: Option<String>,
    /// Version the client last read
    pub version: i32,
}

/// Trim, drop duplicates, keep first-seen order
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(raw.len());

    for tag in raw.iter().map(|t| t.trim()) {
        let chars = tag.chars().count();
        if chars == 0 || chars > MAX_POST_TAG_CHARS {
            return Err(AppError::Validation(format!(
                "each tag must be 1-{} characters",
                MAX_POST_TAG_CHARS
            )));
        }
        if seen.insert(tag) {
            tags.push(tag.to_string());
        }
    }

    if tags.len() > MAX_POST_TAGS {
        return Err(AppError::Validation(format!(
            "at most {} tags per post",
            MAX_POST_TAGS
        )));
    }

    Ok(tags)
}

fn ensure_author(post: &Post, caller: UserId) -> Result<()> {
    if post.user_id != caller.0 {
        tracing::warn!(post_id = post.id, user_id = caller.0, "caller is not the post author");
        return Err(AppError::Forbidden("only the author may modify this post".to_string()));
    }
    Ok(())
}

/// Create a new post
pub async fn create_post(
    storage: web::Data<Storage>,
    caller: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let tags = normalize_tags(&req.tags)?;

    let repo = PostRepository::new(storage.get_ref().clone());
    let post = repo.create(caller.0, &req.title, &req.content, &tags).await?;

    tracing::info!(post_id = post.id, user_id = caller.0, "post created");
    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID together with its comments
pub async fn get_post(
    storage: web::Data<Storage>,
    _caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let posts = PostRepository::new(storage.get_ref().clone());
    let comments = CommentRepository::new(storage.get_ref().clone());

    let mut post = posts.get_by_id(post_id).await?;
    post.comments = comments.get_by_post_id(post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Update title and/or content, guarded by the post version
pub async fn update_post(
    storage: web::Data<Storage>,
    caller: UserId,
    path: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let post_id = path.into_inner();
    let repo = PostRepository::new(storage.get_ref().clone());

    let post = repo.get_by_id(post_id).await?;
    ensure_author(&post, caller)?;

    let title = req.title.as_deref().unwrap_or(&post.title);
    let content = req.content.as_deref().unwrap_or(&post.content);

    let updated = repo.update(post_id, title, content, req.version).await?;

    tracing::info!(post_id, version = updated.version, "post updated");
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a post and, through the cascade, its comments
pub async fn delete_post(
    storage: web::Data<Storage>,
    caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let repo = PostRepository::new(storage.get_ref().clone());

    let post = repo.get_by_id(post_id).await?;
    ensure_author(&post, caller)?;
    repo.delete(post_id).await?;

    tracing::info!(post_id, user_id = caller.0, "post deleted");
    Ok(HttpResponse::NoContent().finish())
}
