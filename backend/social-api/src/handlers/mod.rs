//! HTTP handlers for social-api
//!
//! - Authentication: registration and token issuance
//! - Users: profile lookup, follow and unfollow
//! - Posts: create, read (with comments), optimistic update, delete
//! - Comments: create and list per post
//! - Feed: paginated, filtered feed of own and followed posts

pub mod auth;
pub mod comments;
pub mod feed;
pub mod health;
pub mod posts;
pub mod users;

pub use auth::{create_token, register_user};
pub use comments::{create_comment, list_comments};
pub use feed::get_feed;
pub use health::health_check;
pub use posts::{create_post, delete_post, get_post, update_post};
pub use users::{follow_user, get_user, unfollow_user};
