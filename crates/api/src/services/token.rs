//! Session-token service.
//!
//! Issues and verifies the signed, time-limited bearer tokens that serve as
//! stateless session credentials. There is no server-side session table and
//! no revocation list; a token stays valid until its expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use freshcart_core::{Role, UserId};

/// Session tokens are valid for 7 days from issuance.
pub const TOKEN_LIFETIME: Duration = Duration::days(7);

/// Errors from token verification or issuance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,
    /// Malformed token or bad signature.
    #[error("invalid token")]
    Invalid,
    /// The claims could not be signed.
    #[error("token signing failed")]
    Signing,
}

/// The claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID.
    pub sub: i32,
    /// Role at issuance time. A later role change does not invalidate
    /// outstanding tokens.
    pub role: Role,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// The user this token was issued to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// HMAC-signed session-token service.
///
/// Built once at startup from the configured signing secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the shared signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation: Validation::default(),
        }
    }

    /// Issue a token for `user_id` with an expiry [`TOKEN_LIFETIME`] out.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the claims cannot be signed.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_i32(),
            role,
            iat: now.timestamp(),
            exp: (now + TOKEN_LIFETIME).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` when the expiry has passed and
    /// `TokenError::Invalid` for a bad signature or malformed token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
