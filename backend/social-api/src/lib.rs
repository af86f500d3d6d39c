//! Social API Library
//!
//! HTTP service for users, posts, comments and the follow graph, plus a
//! paginated feed of followed authors' posts.
//!
//! # Modules
//!
//! - `config`: Configuration management
//! - `db`: Storage handle and repositories, including the feed query
//! - `error`: Error types and HTTP mapping
//! - `handlers`: HTTP request handlers
//! - `metrics`: Prometheus collectors and the `/metrics` handler
//! - `middleware`: Bearer-token authentication
//! - `models`: Data structures
//! - `pagination`: Feed query-string parsing
//! - `routes`: Route table
//! - `security`: Password hashing

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::Storage;
pub use error::{AppError, Result};
