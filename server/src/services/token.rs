//! Admin session tokens (HS256 JWT).
//!
//! Tokens are stateless: login signs `{username, exp}` and every protected
//! route verifies the signature and expiry. Logout is purely client-side.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token已过期")]
    Expired,
    #[error("无效的Token")]
    Invalid,
    #[error("token lifetime overflows the clock")]
    TtlOverflow,
    #[error("token encoding failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::TtlOverflow`] if the expiry is not representable,
    /// [`TokenError::Encode`] if signing fails.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let exp = Utc::now().checked_add_signed(self.ttl).ok_or(TokenError::TtlOverflow)?;
        let claims = Claims { username: username.to_owned(), exp: exp.timestamp() };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] past `exp`, [`TokenError::Invalid`] otherwise.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
