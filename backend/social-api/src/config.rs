//! Configuration management for social-api
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the binary before this runs). Malformed values are configuration errors.

use db_pool::env_utils::{parse_env_or_default, parse_env_required};
use db_pool::DbConfig;
use std::fmt;

const SERVICE_NAME: &str = "social-api";
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database pool and per-query deadline
    pub database: DbConfig,
    /// Bearer-token settings
    pub auth: AuthConfig,
    /// Log output settings
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub audience: String,
    pub issuer: String,
    pub expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let app = AppConfig {
            env: app_env,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_or_default("APP_PORT", 8080)?,
        };

        let cors = {
            let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if app.is_production() => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                Err(_) => "http://localhost:3000".to_string(),
            };

            if app.is_production() && allowed_origins.trim() == "*" {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        let database = DbConfig::from_env(SERVICE_NAME)?;

        let auth = {
            let jwt_secret: String = parse_env_required("JWT_SECRET")?;
            if jwt_secret.trim().is_empty() {
                return Err("JWT_SECRET must not be empty".to_string());
            }
            if app.is_production() && jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(format!(
                    "JWT_SECRET must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                ));
            }

            let expiry_hours: i64 = parse_env_or_default("JWT_EXPIRY_HOURS", 72)?;
            if expiry_hours <= 0 {
                return Err("JWT_EXPIRY_HOURS must be positive".to_string());
            }

            AuthConfig {
                jwt_secret,
                audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "social".to_string()),
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "social".to_string()),
                expiry_hours,
            }
        };

        let log = LogConfig {
            format: match std::env::var("LOG_FORMAT") {
                Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        };

        Ok(Config {
            app,
            cors,
            database,
            auth,
            log,
        })
    }
}
