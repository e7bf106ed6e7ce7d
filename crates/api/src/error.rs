//! Unified error handling for the API.
//!
//! Provides a unified `AppError` type mapped onto the HTTP error taxonomy.
//! All route handlers return `Result<T, AppError>`. Every failure is
//! terminal for its request; nothing here retries.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::pricing::PricingError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout pricing validation failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Missing or malformed fields in the request.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request lacks a valid identity on a hard-auth route.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role does not permit this route.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// State conflict, e.g. duplicate email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => auth_status(err),
            Self::Pricing(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn message(&self) -> String {
        match self {
            // Never leak store/internal detail to clients outside debug builds
            Self::Database(_) | Self::Internal(_) => {
                if cfg!(debug_assertions) {
                    self.to_string()
                } else {
                    "Internal server error".to_string()
                }
            }
            Self::Auth(err) => auth_message(err),
            Self::Pricing(err) => err.to_string(),
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::Conflict(msg) => msg.clone(),
        }
    }
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        // Login failures are distinct messages but the same class
        AuthError::UserNotFound | AuthError::WrongPassword => StatusCode::UNAUTHORIZED,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) | AuthError::MissingField(_) => {
            StatusCode::BAD_REQUEST
        }
        AuthError::InvalidResetToken | AuthError::ResetTokenExpired => StatusCode::BAD_REQUEST,
        AuthError::Repository(_) | AuthError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_message(err: &AuthError) -> String {
    match err {
        // The two login failures must never be confused with each other,
        // matching the documented behavior of the service.
        AuthError::UserNotFound => "User not found".to_string(),
        AuthError::WrongPassword => "Wrong password".to_string(),
        AuthError::EmailTaken => "Email already registered".to_string(),
        AuthError::WeakPassword(msg) => msg.clone(),
        AuthError::InvalidEmail(e) => e.to_string(),
        AuthError::MissingField(field) => format!("Field '{field}' is required"),
        AuthError::InvalidResetToken => "Invalid reset token".to_string(),
        AuthError::ResetTokenExpired => "Reset token expired".to_string(),
        AuthError::Repository(_) | AuthError::PasswordHash => {
            "Internal server error".to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side detail is logged in full; the client sees the taxonomy
        if matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let body = ErrorBody {
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("order".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("no token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("admin only".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Conflict("duplicate email".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_login_failures_keep_distinct_messages() {
        let not_found = AppError::Auth(AuthError::UserNotFound);
        let wrong_password = AppError::Auth(AuthError::WrongPassword);

        assert_eq!(not_found.message(), "User not found");
        assert_eq!(wrong_password.message(), "Wrong password");
        assert_eq!(not_found.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    }
}
