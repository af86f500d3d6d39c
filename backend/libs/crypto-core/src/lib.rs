//! Shared token helpers for the social services
//!
//! Only bearer-token issuance and validation live here; password hashing is
//! owned by the service that stores credentials.
pub mod jwt;

pub use jwt::{Claims, JwtAuthenticator, JwtError};
