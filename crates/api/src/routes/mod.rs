//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Auth
//! POST /api/auth/register          - Register a customer account
//! POST /api/auth/login             - Login, returns a bearer token
//! POST /api/auth/forgot-password   - Issue a password-reset token
//! POST /api/auth/reset-password    - Redeem a reset token
//!
//! # Orders
//! POST /api/orders                 - Checkout (guest or authenticated)
//! GET  /api/orders                 - The caller's own orders (auth required)
//!
//! # Catalog
//! GET  /api/products               - Product listing
//! GET  /api/products/categories    - Category listing
//! GET  /api/products/{id}          - Product detail
//! POST /api/products               - Create product (admin)
//! PUT  /api/products/{id}          - Update product (admin)
//! DELETE /api/products/{id}        - Delete product (admin)
//!
//! # Settings
//! GET  /api/settings               - Pricing settings (public)
//!
//! # Admin
//! GET  /api/admin/stats            - Dashboard statistics
//! GET  /api/admin/orders           - Recent orders
//! PUT  /api/admin/orders/status    - Set an order's status
//! GET  /api/admin/users            - User listing
//! POST /api/admin/users            - Create a user
//! PUT  /api/admin/users/{id}       - Update a user
//! DELETE /api/admin/users/{id}     - Delete a user
//! POST /api/admin/categories         - Create a category
//! POST /api/admin/categories/rename  - Rename a category everywhere
//! POST /api/admin/categories/delete  - Delete a category everywhere
//! PUT  /api/admin/settings         - Update pricing settings
//! ```

pub mod admin;
pub mod auth;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Router,
    extract::State,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::Result;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password));

    let admin_routes = Router::new()
        .route("/stats", get(admin::stats))
        .route("/orders", get(admin::list_orders))
        .route("/orders/status", put(admin::update_order_status))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route("/categories", post(admin::create_category))
        .route("/categories/rename", post(admin::rename_category))
        .route("/categories/delete", post(admin::delete_category))
        .route("/settings", put(admin::update_settings));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health_ready))
        .nest("/api/auth", auth_routes)
        .route(
            "/api/orders",
            post(orders::create_order).get(orders::my_orders),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/categories", get(products::list_categories))
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/settings", get(settings::get_settings))
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /health`
async fn health() -> &'static str {
    "OK"
}

/// `GET /health/ready`
async fn health_ready(State(state): State<AppState>) -> Result<&'static str> {
    sqlx::query("SELECT 1").execute(state.pool()).await.map_err(
        |e| crate::error::AppError::Internal(format!("database unreachable: {e}")),
    )?;
    Ok("OK")
}
