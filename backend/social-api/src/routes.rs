//! Route table shared by the binary and the HTTP tests.

use actix_web::{web, HttpResponse, ResponseError};
use crypto_core::JwtAuthenticator;
use std::sync::Arc;

use crate::error::AppError;
use crate::handlers;
use crate::metrics;
use crate::middleware::JwtAuthMiddleware;

/// Request bodies above this size are rejected before deserialization
const JSON_PAYLOAD_LIMIT: usize = 64 * 1024;

/// Register every route; everything under `/v1` except health and
/// authentication requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig, authenticator: Arc<JwtAuthenticator>) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .route("/metrics", web::get().to(metrics::serve_metrics))
        .route("/v1/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/v1/authentication")
                .route("/user", web::post().to(handlers::register_user))
                .route("/token", web::post().to(handlers::create_token)),
        )
        .service(
            web::scope("/v1")
                .wrap(JwtAuthMiddleware::new(authenticator))
                .service(
                    web::scope("/users")
                        .route("/feed", web::get().to(handlers::get_feed))
                        .route("/{user_id}", web::get().to(handlers::get_user))
                        .route("/{user_id}/follow", web::put().to(handlers::follow_user))
                        .route("/{user_id}/unfollow", web::put().to(handlers::unfollow_user)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(handlers::create_post))
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(handlers::get_post))
                                .route(web::patch().to(handlers::update_post))
                                .route(web::delete().to(handlers::delete_post)),
                        )
                        .service(
                            web::resource("/{post_id}/comments")
                                .route(web::post().to(handlers::create_comment))
                                .route(web::get().to(handlers::list_comments)),
                        ),
                ),
        );
}

fn bad_request(message: String) -> actix_web::Error {
    AppError::Validation(message).into()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _| bad_request(err.to_string()))
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _| bad_request(err.to_string()))
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _| bad_request(err.to_string()))
}

/// Fallback for unknown routes, in the same error shape as handlers use
pub async fn not_found() -> HttpResponse {
    AppError::NotFound("route not found".to_string()).error_response()
}

