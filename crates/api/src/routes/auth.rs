//! Authentication route handlers.
//!
//! Registration, login, and the two-step password-reset flow. All bodies and
//! responses are JSON; users always leave through [`crate::models::PublicUser`].

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PublicUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
}

/// Login response: the session token and the public user view.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Plain confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&body.name, &body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.public())))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&body.email, &body.password).await?;

    let token = state
        .tokens()
        .issue(user.id, user.role)
        .map_err(|e| AppError::Internal(format!("token issuance failed: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: user.public(),
    }))
}

/// `POST /api/auth/forgot-password`
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let auth = AuthService::new(state.pool());
    auth.request_password_reset(&body.email, Utc::now())
        .await
        .map_err(|e| match e {
            // An unknown email on this route is a 404, not a login failure
            AuthError::UserNotFound => AppError::NotFound("User not found".to_string()),
            other => AppError::from(other),
        })?;

    Ok(Json(MessageResponse {
        message: "Password reset token generated".to_string(),
    }))
}

/// `POST /api/auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let auth = AuthService::new(state.pool());
    auth.reset_password(&body.email, &body.token, &body.password, Utc::now())
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
