use crate::config::AppConfig;
use crate::db::Storage;
use actix_web::{web, HttpResponse};

/// Liveness plus a database round trip
pub async fn health_check(storage: web::Data<Storage>, app: web::Data<AppConfig>) -> HttpResponse {
    match storage.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "env": app.env,
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unavailable",
                "env": app.env,
                "version": env!("CARGO_PKG_VERSION"),
            }))
        }
    }
}
