//! Authentication middleware and extractors.
//!
//! Route handlers declare their auth requirement by taking one of the
//! extractors below. All of them read the `Authorization: Bearer <token>`
//! header and verify it against the shared token service; none of them touch
//! the database. `RequireAdmin` authenticates first and only then checks the
//! role, so a garbage token on an admin route is a 401, not a 403.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use freshcart_core::{Role, UserId};

use crate::error::AppError;
use crate::services::token::TokenError;
use crate::state::AppState;

/// The verified identity extracted from a bearer token.
///
/// Carries only what the token itself proves. Handlers that need the full
/// user record load it from the repository.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Extractor that requires a valid bearer token.
///
/// ```rust,ignore
/// async fn my_orders(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("orders for {}", user.user_id)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let claims = state.tokens().verify(token).map_err(|e| match e {
            TokenError::Expired => AppError::Unauthorized("Token expired".to_string()),
            _ => AppError::Unauthorized("Invalid token".to_string()),
        })?;

        Ok(Self(AuthUser {
            user_id: claims.user_id(),
            role: claims.role,
        }))
    }
}

/// Extractor that attaches an identity when a valid token is present.
///
/// Unlike [`RequireAuth`], this never rejects: a missing, malformed, or
/// expired token degrades to `None`. Checkout uses this to accept guest
/// carts.
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts)
            .and_then(|token| state.tokens().verify(token).ok())
            .map(|claims| AuthUser {
                user_id: claims.user_id(),
                role: claims.role,
            });

        Ok(Self(user))
    }
}

/// Extractor that requires a valid bearer token carrying the admin role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Authenticate before authorizing
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(Self(user))
    }
}

/// The token from an `Authorization: Bearer <token>` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ApiConfig, PricingMode};

    fn test_state() -> AppState {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            jwt_secret: SecretString::from("kX9#mP2$vL5@qR8&wT1*zN4^bC7!fJ0d"),
            pricing_mode: PricingMode::Recompute,
        };
        // Lazy pool: never connects, the extractors only verify tokens
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AppState::new(config, pool)
    }

    fn test_router(state: AppState) -> Router {
        async fn protected(RequireAuth(user): RequireAuth) -> String {
            user.user_id.to_string()
        }
        async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
            user.user_id.to_string()
        }
        async fn open(OptionalAuth(user): OptionalAuth) -> String {
            user.map_or_else(|| "guest".to_string(), |u| u.user_id.to_string())
        }

        Router::new()
            .route("/protected", get(protected))
            .route("/admin", get(admin_only))
            .route("/open", get(open))
            .with_state(state)
    }

    async fn status_of(router: Router, uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_require_auth_without_token() {
        let state = test_state();
        let status = status_of(test_router(state), "/protected", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_auth_with_garbage_token() {
        let state = test_state();
        let status = status_of(test_router(state), "/protected", Some("nonsense")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_auth_with_valid_token() {
        let state = test_state();
        let token = state.tokens().issue(UserId::new(7), Role::Customer).unwrap();
        let status = status_of(test_router(state), "/protected", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_customer() {
        let state = test_state();
        let token = state.tokens().issue(UserId::new(7), Role::Customer).unwrap();
        let status = status_of(test_router(state), "/admin", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_bad_token_as_unauthenticated() {
        let state = test_state();
        let status = status_of(test_router(state), "/admin", Some("nonsense")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_admin_accepts_admin() {
        let state = test_state();
        let token = state.tokens().issue(UserId::new(1), Role::Admin).unwrap();
        let status = status_of(test_router(state), "/admin", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_optional_auth_degrades_to_guest() {
        let state = test_state();
        let router = test_router(state);
        assert_eq!(status_of(router.clone(), "/open", None).await, StatusCode::OK);
        assert_eq!(
            status_of(router, "/open", Some("nonsense")).await,
            StatusCode::OK
        );
    }
}
