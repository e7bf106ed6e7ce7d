//! Category repository for database operations.
//!
//! Categories are referenced from products by name, not by foreign key, so
//! rename and delete are multi-step writes touching both tables. Both run
//! inside a transaction; the underlying store supports one, so there is no
//! reason to leave the two steps observable half-applied.

use sqlx::PgPool;

use freshcart_core::CategoryId;

use super::{RepositoryError, map_unique_violation};
use crate::models::Category;

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(self.pool)
                .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Get a category by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    pub async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "category already exists"))?;

        Ok(Category::from(row))
    }

    /// Ensure a category row exists for this name.
    ///
    /// Used by the category listing to register names already referenced by
    /// products (auto-migration of legacy data).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Rename a category and rewrite the name on every product using it.
    ///
    /// Returns the number of products rewritten. Both writes happen in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new name already exists,
    /// and `RepositoryError::Database` for other database errors.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE categories SET name = $2 WHERE name = $1")
            .bind(old_name)
            .bind(new_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, "category already exists"))?;

        let result = sqlx::query("UPDATE products SET category = $2 WHERE category = $1")
            .bind(old_name)
            .bind(new_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete a category and unassign it from every product using it.
    ///
    /// Returns the number of products unassigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either write fails.
    pub async fn delete(&self, name: &str) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM categories WHERE name = $1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE products SET category = '' WHERE category = $1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
