//! Bearer-token issuance and validation
//!
//! Tokens are HS256-signed and carry the user id in `sub` together with the
//! audience and issuer the service was configured with. The authenticator is
//! built once at startup and handed to whoever needs it; there is no global
//! key storage.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Duration;
//! use crypto_core::JwtAuthenticator;
//!
//! let auth = JwtAuthenticator::new("change-me", "social", "social", Duration::hours(1))
//!     .expect("valid secret");
//! let token = auth.generate_token(42).expect("token");
//! let data = auth.validate_token(&token).expect("valid token");
//! assert_eq!(data.claims.user_id().unwrap(), 42);
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};

/// HMAC only; the validator refuses every other algorithm
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Token validation failed: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("Invalid subject in token: {0}")]
    InvalidSubject(String),
}

/// Registered claims used by the social API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidSubject(self.sub.clone()))
    }
}

pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
    issuer: String,
    expiry: Duration,
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl JwtAuthenticator {
    pub fn new(
        secret: &str,
        audience: &str,
        issuer: &str,
        expiry: Duration,
    ) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "nbf", "sub", "aud", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            audience: audience.to_string(),
            issuer: issuer.to_string(),
            expiry,
        })
    }

    /// Issue a token for `user_id` valid from now until now + expiry
    pub fn generate_token(&self, user_id: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims with this authenticator's key
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding_key).map_err(JwtError::Signing)
    }

    /// Verify signature, algorithm, audience, issuer and time window
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            JwtError::Invalid(e)
        })
    }
}
