//! User profile and follow handlers

use crate::db::{FollowerRepository, Storage, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};

/// Get a user by ID
pub async fn get_user(
    storage: web::Data<Storage>,
    _caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let repo = UserRepository::new(storage.get_ref().clone());
    let user = repo.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Follow a user; following twice is a no-op
pub async fn follow_user(
    storage: web::Data<Storage>,
    caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let target = path.into_inner();
    if target == caller.0 {
        return Err(AppError::Validation("cannot follow yourself".to_string()));
    }

    let users = UserRepository::new(storage.get_ref().clone());
    if !users.exists(target).await? {
        return Err(AppError::NotFound(format!("user {} not found", target)));
    }

    let followers = FollowerRepository::new(storage.get_ref().clone());
    if followers.follow(caller.0, target).await? {
        tracing::info!(follower_id = caller.0, user_id = target, "user followed");
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Unfollow a user; unfollowing someone not followed is a no-op
pub async fn unfollow_user(
    storage: web::Data<Storage>,
    caller: UserId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let target = path.into_inner();
    let followers = FollowerRepository::new(storage.get_ref().clone());
    if followers.unfollow(caller.0, target).await? {
        tracing::info!(follower_id = caller.0, user_id = target, "user unfollowed");
    }

    Ok(HttpResponse::NoContent().finish())
}
