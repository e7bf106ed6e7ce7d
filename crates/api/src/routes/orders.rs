//! Order route handlers.
//!
//! Checkout accepts guest and logged-in carts alike. A bearer token, when
//! present and valid, is resolved to a live user record; a token for a
//! deleted account degrades to a guest checkout rather than failing it.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::{orders::OrderRepository, settings::SettingsRepository, users::UserRepository};
use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Identity, LineItem, Order};
use crate::services::pricing::{self, ClaimedTotals};
use crate::state::AppState;

/// Checkout request body.
///
/// The money fields are optional client claims: cross-checked in recompute
/// mode, required and trusted in trust-client mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let identity = match auth {
        Some(user) => match UserRepository::new(state.pool()).find_by_id(user.user_id).await? {
            Some(user) => Identity::Authenticated {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            None => Identity::Anonymous,
        },
        None => Identity::Anonymous,
    };

    let settings = SettingsRepository::new(state.pool()).get_or_create().await?;
    let claimed = ClaimedTotals {
        subtotal: body.subtotal,
        delivery_fee: body.delivery_fee,
        total: body.total,
    };
    let priced = pricing::price_order(&body.items, &claimed, &settings, state.pricing_mode())?;

    let order = OrderRepository::new(state.pool())
        .create(
            &body.items,
            &identity,
            priced.subtotal,
            priced.delivery_fee,
            priced.total,
        )
        .await?;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn my_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .find_by_user(user.user_id)
        .await?;
    Ok(Json(orders))
}
