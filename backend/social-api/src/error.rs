//! Error types for the social API
//!
//! Repository calls return the most specific kind they can detect; the HTTP
//! layer maps each kind to a status code. Server-side failures are logged and
//! answered with a generic message so storage details never reach clients.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Result type for social-api operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned for every server-side failure
const INTERNAL_ERROR_MESSAGE: &str = "the server encountered a problem";

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stale version on an optimistic update, or a uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying data-access failure
    #[error("Database error: {0}")]
    Database(String),

    /// Data-access call exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Identity not established
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity established but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the failure is the server's fault rather than the caller's
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Timeout(_) | AppError::Internal(_)
        )
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg.clone(),
            AppError::Database(_) | AppError::Timeout(_) | AppError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Timeout(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        }))
    }
}

// Postgres SQLSTATE codes the repositories care about
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("resource not found".to_string()),
            sqlx::Error::PoolTimedOut => {
                AppError::Timeout("timed out acquiring a database connection".to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => AppError::Conflict(match db_err.constraint() {
                    Some(constraint) if constraint.contains("username") => {
                        "a user with that username already exists".to_string()
                    }
                    Some(constraint) if constraint.contains("email") => {
                        "a user with that email already exists".to_string()
                    }
                    _ => "resource already exists".to_string(),
                }),
                Some(FOREIGN_KEY_VIOLATION) => {
                    AppError::Validation("referenced resource does not exist".to_string())
                }
                Some(CHECK_VIOLATION)
                | Some(NOT_NULL_VIOLATION)
                | Some(STRING_DATA_RIGHT_TRUNCATION) => {
                    AppError::Validation(format!("constraint violation: {}", db_err.message()))
                }
                _ => AppError::Database(err.to_string()),
            },
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<crypto_core::JwtError> for AppError {
    fn from(err: crypto_core::JwtError) -> Self {
        match err {
            crypto_core::JwtError::Signing(_) | crypto_core::JwtError::EmptySecret => {
                AppError::Internal(err.to_string())
            }
            _ => AppError::Unauthorized("invalid or expired token".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Timeout("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Timeout(_)));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_other_sqlx_errors_map_to_database() {
        let err: AppError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let err = AppError::Database("relation \"posts\" does not exist".into());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], 500);
        assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[actix_web::test]
    async fn test_client_errors_keep_message() {
        let err = AppError::Conflict("post was modified concurrently".into());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], 409);
        assert_eq!(json["error"], "post was modified concurrently");
    }
}
