//! JWT token generation and validation.
//!
//! Tokens carry the authenticated subject and email. The signing secret
//! is set once at startup and shared through a process-wide cell so
//! token helpers stay free functions.

use std::sync::OnceLock;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

static JWT_SECRET: OnceLock<String> = OnceLock::new();

/// Errors from token generation or validation.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(#[from] jsonwebtoken::errors::Error),

    #[error("JWT secret not initialized")]
    SecretNotInitialized,

    #[error("token expired")]
    Expired,

    #[error("signature or claims rejected")]
    InvalidToken,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Stable subject identifier from the identity provider.
    pub sub: String,
    /// Email address, used for the admin allowlist check.
    pub email: String,
    /// Display name, when the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: &str, email: &str, name: Option<&str>, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            name: name.map(|n| n.to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
        }
    }
}

/// Initialize the process-wide JWT secret. Later calls are no-ops,
/// which keeps repeated test setups harmless.
pub fn init_jwt_secret(secret: &str) {
    let _ = JWT_SECRET.set(secret.to_string());
}

fn get_secret() -> Result<&'static str, JwtError> {
    JWT_SECRET
        .get()
        .map(|s| s.as_str())
        .ok_or(JwtError::SecretNotInitialized)
}

/// Generate a token with the default 24 hour expiry.
pub fn generate_token(subject: &str, email: &str, name: Option<&str>) -> Result<String, JwtError> {
    generate_token_with_expiry(subject, email, name, 24)
}

/// Generate a token with a custom expiry.
pub fn generate_token_with_expiry(
    subject: &str,
    email: &str,
    name: Option<&str>,
    expiry_hours: i64,
) -> Result<String, JwtError> {
    let secret = get_secret()?;
    let claims = Claims::new(subject, email, name, expiry_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate a token and return its claims.
///
/// Expiry keeps its own error so clients know to refresh; every other
/// decode failure collapses to `InvalidToken` without detail.
pub fn validate_token(token: &str) -> Result<Claims, JwtError> {
    let secret = get_secret()?;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::InvalidToken,
    })?;
    Ok(data.claims)
}
