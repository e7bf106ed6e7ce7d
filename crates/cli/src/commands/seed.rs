//! Sample-data seeding command.

use rust_decimal::Decimal;

use freshcart_api::db::{categories::CategoryRepository, products::ProductRepository};

use super::CliError;

const CATEGORIES: &[&str] = &["Fruits", "Vegetables", "Dairy", "Bakery"];

// (title, price in cents, category)
const PRODUCTS: &[(&str, i64, &str)] = &[
    ("Bananas 1kg", 199, "Fruits"),
    ("Apples 1kg", 349, "Fruits"),
    ("Carrots 500g", 89, "Vegetables"),
    ("Tomatoes 1kg", 299, "Vegetables"),
    ("Whole Milk 1L", 129, "Dairy"),
    ("Cheddar 200g", 399, "Dairy"),
    ("Sourdough Loaf", 450, "Bakery"),
];

/// Seed the catalog with sample categories and products.
///
/// Idempotent for categories (upsert); products are inserted as new rows on
/// every run.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;
    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    for name in CATEGORIES {
        categories.upsert(name).await?;
    }
    tracing::info!(count = CATEGORIES.len(), "Categories seeded");

    for (title, cents, category) in PRODUCTS {
        let price = Decimal::new(*cents, 2);
        products.create(title, price, None, category).await?;
    }
    tracing::info!(count = PRODUCTS.len(), "Products seeded");

    Ok(())
}
