//! Catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use freshcart_core::{CategoryId, ProductId};

/// A catalog product.
///
/// `category` is a plain name, not a foreign key; an empty string means
/// unassigned. Category renames rewrite this field across all products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// A category name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
