//! Registration and token issuance

use crate::db::{Storage, UserRepository};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{hash_password, verify_password};
use actix_web::{web, HttpResponse};
use crypto_core::JwtAuthenticator;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTokenRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a user and hand back a token for it
pub async fn register_user(
    storage: web::Data<Storage>,
    authenticator: web::Data<JwtAuthenticator>,
    req: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let username = req.username.trim().to_string();
    let email = req.email.trim().to_string();
    let password_hash = hash_password(&req.password)?;

    let repo = UserRepository::new(storage.get_ref().clone());
    let (id, created_at) = repo.create(&username, &email, &password_hash).await?;
    let token = authenticator.generate_token(id)?;

    tracing::info!(user_id = id, "user registered");

    Ok(HttpResponse::Created().json(UserWithToken {
        user: User {
            id,
            username,
            email,
            password_hash,
            created_at,
        },
        token,
    }))
}

/// Exchange email and password for a bearer token
pub async fn create_token(
    storage: web::Data<Storage>,
    authenticator: web::Data<JwtAuthenticator>,
    req: web::Json<CreateTokenRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let invalid = || AppError::Unauthorized("invalid email or password".to_string());

    let repo = UserRepository::new(storage.get_ref().clone());
    let user = match repo.get_by_email(req.email.trim()).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(invalid()),
        Err(e) => return Err(e),
    };

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = authenticator.generate_token(user.id)?;
    tracing::info!(user_id = user.id, "token issued");

    Ok(HttpResponse::Created().json(TokenResponse { token }))
}
