//! Catalog route handlers.
//!
//! Public reads plus admin-only writes. The category listing folds in names
//! that exist only on product rows, registering them as real category
//! records on the way out.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use freshcart_core::ProductId;

use crate::db::{categories::CategoryRepository, products::ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Category, Product};
use crate::state::AppState;

/// Product create/update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .find_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

/// `GET /api/products/categories`
///
/// Lists category records, first registering any name that is referenced by
/// a product but missing from the categories table.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let products = ProductRepository::new(state.pool());
    let categories = CategoryRepository::new(state.pool());

    for name in products.distinct_categories().await? {
        categories.upsert(&name).await?;
    }

    Ok(Json(categories.list().await?))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<ProductRequest>,
) -> Result<impl IntoResponse> {
    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Field 'title' is required".to_string()))?;
    let price = body
        .price
        .ok_or_else(|| AppError::Validation("Field 'price' is required".to_string()))?;
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }

    let product = ProductRepository::new(state.pool())
        .create(
            title,
            price,
            body.image.as_deref(),
            body.category.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>> {
    if let Some(price) = body.price
        && price < Decimal::ZERO
    {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }

    let product = ProductRepository::new(state.pool())
        .update(
            ProductId::new(id),
            body.title.as_deref(),
            body.price,
            body.image.as_deref(),
            body.category.as_deref(),
        )
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Product not found".to_string())
            }
            other => AppError::from(other),
        })?;

    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
