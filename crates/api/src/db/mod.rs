//! Database operations for the FreshCart `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Credential store (argon2 hashes, roles, reset-token fields)
//! - `products` - Catalog
//! - `categories` - Category names
//! - `orders` - Checkout records with JSONB line items
//! - `settings` - Singleton pricing configuration (lazily created)
//!
//! All persistence operations are independent, non-transactional calls
//! unless a repository method explicitly opens a transaction (category
//! rename is the one multi-step write that does). No retries: a store
//! failure propagates immediately as an error response.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p freshcart-cli -- migrate
//! ```

pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use settings::SettingsRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
fn map_unique_violation(e: sqlx::Error, conflict_msg: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict_msg.to_owned());
    }
    RepositoryError::Database(e)
}
