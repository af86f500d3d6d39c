use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{anyhow, Context};
use crypto_core::JwtAuthenticator;
use db_pool::create_pool;
use social_api::config::{LogConfig, LogFormat};
use social_api::{routes, Config, Storage};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Social API
///
/// # Routes
///
/// - `/v1/authentication/*` - Registration and token issuance
/// - `/v1/users/*` - Profiles, follow graph, feed
/// - `/v1/posts/*` - Posts and their comments
/// - `/v1/health`, `/metrics` - Operational endpoints
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log);

    tracing::info!("Starting social-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let authenticator = Arc::new(
        JwtAuthenticator::new(
            &config.auth.jwt_secret,
            &config.auth.audience,
            &config.auth.issuer,
            chrono::Duration::hours(config.auth.expiry_hours),
        )
        .map_err(|e| anyhow!("Failed to initialize JWT authenticator: {}", e))?,
    );

    config.database.log_config();
    let query_timeout = config.database.query_timeout();
    let db_pool = create_pool(config.database.clone())
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let storage = web::Data::new(Storage::new(db_pool.clone(), query_timeout));
    let auth_data = web::Data::from(authenticator.clone());
    let app_config = web::Data::new(config.app.clone());
    let cors_config = config.cors.clone();

    let bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_config.origins() {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let authenticator = authenticator.clone();

        App::new()
            .app_data(storage.clone())
            .app_data(auth_data.clone())
            .app_data(app_config.clone())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(move |cfg| routes::configure(cfg, authenticator))
            .default_service(web::route().to(routes::not_found))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .disable_signals()
    .run();

    let server_handle = server.handle();

    tokio::select! {
        result = server => {
            result.context("HTTP server failed")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    db_pool.close().await;
    tracing::info!("social-api stopped");

    Ok(())
}
