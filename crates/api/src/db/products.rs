//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use freshcart_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, title, price, image, category, created_at";

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    title: String,
    price: Decimal,
    image: Option<String>,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            price: row.price,
            image: row.image,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        price: Decimal,
        image: Option<&str>,
        category: &str,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (title, price, image, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(title)
        .bind(price)
        .bind(image)
        .bind(category)
        .fetch_one(self.pool)
        .await?;

        Ok(Product::from(row))
    }

    /// Partially update a product. `None` leaves a field unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    pub async fn update(
        &self,
        id: ProductId,
        title: Option<&str>,
        price: Option<Decimal>,
        image: Option<&str>,
        category: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET \
                 title = COALESCE($2, title), \
                 price = COALESCE($3, price), \
                 image = COALESCE($4, image), \
                 category = COALESCE($5, category) \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(price)
        .bind(image)
        .bind(category)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Product::from(row))
    }

    /// Delete a product.
    ///
    /// Returns `true` if a product was deleted, `false` if none had this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// The distinct non-empty category names currently used by products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn distinct_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM products WHERE category <> ''")
                .fetch_all(self.pool)
                .await?;
        Ok(names)
    }
}
