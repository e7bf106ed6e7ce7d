//! Authentication error types.

use thiserror::Error;

use freshcart_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required request field was empty or absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// No account with this email.
    #[error("user not found")]
    UserNotFound,

    /// The password did not match the stored hash.
    #[error("wrong password")]
    WrongPassword,

    /// An account with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// The submitted reset token does not match the pending one.
    #[error("invalid reset token")]
    InvalidResetToken,

    /// The pending reset token has expired.
    #[error("reset token expired")]
    ResetTokenExpired,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
