//! Admin route handlers.
//!
//! Dashboard statistics, order management, user management, category
//! management, and pricing-settings updates. Every handler here takes
//! [`RequireAdmin`]; there is no per-handler role logic beyond that.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use freshcart_core::{Email, OrderId, OrderStatus, Role, UserId};

use crate::db::{
    RepositoryError, categories::CategoryRepository, orders::OrderRepository,
    products::ProductRepository, settings::SettingsRepository, users::UserRepository,
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Category, Order, PublicUser, Settings, User};
use crate::services::auth::{hash_password, validate_password};
use crate::state::AppState;

// =============================================================================
// Dashboard
// =============================================================================

/// Dashboard statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub revenue: Decimal,
}

/// `GET /api/admin/stats`
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<StatsResponse>> {
    let pool = state.pool();
    let orders = OrderRepository::new(pool);

    Ok(Json(StatsResponse {
        users: UserRepository::new(pool).count().await?,
        products: ProductRepository::new(pool).count().await?,
        orders: orders.count().await?,
        revenue: orders.total_revenue().await?,
    }))
}

// =============================================================================
// Orders
// =============================================================================

/// Order status update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: i32,
    #[serde(default)]
    pub status: String,
}

/// `GET /api/admin/orders`
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_recent().await?;
    Ok(Json(orders))
}

/// `PUT /api/admin/orders/status`
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>> {
    let status: OrderStatus = body.status.parse().map_err(AppError::Validation)?;

    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(body.order_id), status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Order not found".to_string()),
            other => AppError::from(other),
        })?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}

// =============================================================================
// Users
// =============================================================================

/// Admin user create/update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// `GET /api/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<PublicUser>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users.iter().map(User::public).collect()))
}

/// `POST /api/admin/users`
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<UserRequest>,
) -> Result<impl IntoResponse> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Field 'name' is required".to_string()))?;
    let email = body
        .email
        .as_deref()
        .ok_or_else(|| AppError::Validation("Field 'email' is required".to_string()))?;
    let password = body
        .password
        .as_deref()
        .ok_or_else(|| AppError::Validation("Field 'password' is required".to_string()))?;

    let email = Email::parse(email).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_password(password)?;
    let role = parse_role(body.role.as_deref())?.unwrap_or_default();

    let password_hash = hash_password(password)?;
    let user = UserRepository::new(state.pool())
        .create(name, &email, &password_hash, role)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::Conflict("Email already registered".to_string())
            }
            other => AppError::from(other),
        })?;

    Ok((StatusCode::CREATED, Json(user.public())))
}

/// `PUT /api/admin/users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<UserRequest>,
) -> Result<Json<PublicUser>> {
    let email = body
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let role = parse_role(body.role.as_deref())?;

    let user = UserRepository::new(state.pool())
        .update_profile(UserId::new(id), body.name.as_deref(), email.as_ref(), role)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("User not found".to_string()),
            RepositoryError::Conflict(_) => {
                AppError::Conflict("Email already registered".to_string())
            }
            other => AppError::from(other),
        })?;

    Ok(Json(user.public()))
}

/// `DELETE /api/admin/users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    // An admin cannot delete their own account
    if admin.user_id == UserId::new(id) {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    let deleted = UserRepository::new(state.pool())
        .delete(UserId::new(id))
        .await?;
    if !deleted {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn parse_role(role: Option<&str>) -> Result<Option<Role>> {
    role.map(str::parse).transpose().map_err(AppError::Validation)
}

// =============================================================================
// Categories
// =============================================================================

/// Category create request body.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
}

/// Category rename request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryRequest {
    #[serde(default)]
    pub old_name: String,
    #[serde(default)]
    pub new_name: String,
}

/// Category mutation response: the products rewritten along the way.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMutationResponse {
    pub products_updated: u64,
}

/// `POST /api/admin/categories`
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CategoryRequest>,
) -> Result<impl IntoResponse> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Field 'name' is required".to_string()));
    }

    let category = CategoryRepository::new(state.pool()).create(name).await?;
    Ok((StatusCode::CREATED, Json::<Category>(category)))
}

/// `POST /api/admin/categories/rename`
///
/// Renames the category record and rewrites the name on every product that
/// carries it, in one transaction.
pub async fn rename_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<RenameCategoryRequest>,
) -> Result<Json<CategoryMutationResponse>> {
    let old_name = body.old_name.trim();
    let new_name = body.new_name.trim();
    if old_name.is_empty() || new_name.is_empty() {
        return Err(AppError::Validation(
            "Fields 'oldName' and 'newName' are required".to_string(),
        ));
    }

    let categories = CategoryRepository::new(state.pool());
    if categories.find_by_name(old_name).await?.is_none() {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    let products_updated = categories.rename(old_name, new_name).await?;
    tracing::info!(old = old_name, new = new_name, products_updated, "Category renamed");
    Ok(Json(CategoryMutationResponse { products_updated }))
}

/// `POST /api/admin/categories/delete`
///
/// Deletes the category record and unassigns every product that carried it.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<CategoryMutationResponse>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Field 'name' is required".to_string()));
    }

    let categories = CategoryRepository::new(state.pool());
    if categories.find_by_name(name).await?.is_none() {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    let products_updated = categories.delete(name).await?;
    Ok(Json(CategoryMutationResponse { products_updated }))
}

// =============================================================================
// Settings
// =============================================================================

/// Settings update request body. `null` leaves a field unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub min_order_for_discount: Option<Decimal>,
}

/// `PUT /api/admin/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>> {
    for (field, value) in [
        ("deliveryFee", body.delivery_fee),
        ("discountPercent", body.discount_percent),
        ("minOrderForDiscount", body.min_order_for_discount),
    ] {
        if let Some(value) = value
            && value < Decimal::ZERO
        {
            return Err(AppError::Validation(format!(
                "Field '{field}' must not be negative"
            )));
        }
    }

    let settings = SettingsRepository::new(state.pool())
        .update(
            body.delivery_fee,
            body.discount_percent,
            body.min_order_for_discount,
        )
        .await?;

    tracing::info!(
        delivery_fee = %settings.delivery_fee,
        discount_percent = %settings.discount_percent,
        min_order_for_discount = %settings.min_order_for_discount,
        "Settings updated"
    );
    Ok(Json(settings))
}
