//! JWT token generation
//!
//! Tokens are handed to the client at login. The mock handlers only check
//! that a token is present, so nothing here verifies them on the request path.

use crate::core::error::{Result, GovError};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Phone-derived NRC of the citizen
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Generate a JWT token for a citizen
pub fn generate_token(nrc: &str, secret: &str, ttl: chrono::Duration) -> Result<String> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| GovError::TokenError("Failed to calculate expiration".to_string()))?;

    let claims = Claims {
        sub: nrc.to_string(),
        iat: usize::try_from(now.timestamp()).unwrap_or_default(),
        exp: usize::try_from(expiration.timestamp()).unwrap_or(usize::MAX),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| GovError::TokenError(format!("Failed to generate token: {}", e)))
}
