//! Order repository for database operations.
//!
//! Line items are stored as a JSONB document inside the order row; the
//! order is the unit of persistence and is written atomically at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use freshcart_core::{Email, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{Identity, LineItem, Order};

const ORDER_COLUMNS: &str =
    "id, items, user_id, user_name, user_email, subtotal, delivery_fee, total, status, created_at";

/// How many orders the admin listing returns.
const ADMIN_LIST_LIMIT: i64 = 100;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    items: Json<Vec<LineItem>>,
    user_id: Option<i32>,
    user_name: Option<String>,
    user_email: Option<String>,
    subtotal: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, RepositoryError> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let user_email = row
            .user_email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;

        Ok(Self {
            id: OrderId::new(row.id),
            items: row.items.0,
            user: row.user_id.map(UserId::new),
            user_name: row.user_name,
            user_email,
            subtotal: row.subtotal,
            delivery_fee: row.delivery_fee,
            total: row.total,
            status,
            created_at: row.created_at,
        })
    }
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new order in status `Pending`.
    ///
    /// An [`Identity::Authenticated`] checkout records the user reference
    /// and the name/email snapshot; [`Identity::Anonymous`] leaves all three
    /// null.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        items: &[LineItem],
        identity: &Identity,
        subtotal: Decimal,
        delivery_fee: Decimal,
        total: Decimal,
    ) -> Result<Order, RepositoryError> {
        let (user_id, user_name, user_email) = match identity {
            Identity::Authenticated { id, name, email } => {
                (Some(*id), Some(name.as_str()), Some(email.as_str()))
            }
            Identity::Anonymous => (None, None, None),
        };

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders \
                 (items, user_id, user_name, user_email, subtotal, delivery_fee, total, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(Json(items))
        .bind(user_id)
        .bind(user_name)
        .bind(user_email)
        .bind(subtotal)
        .bind(delivery_fee)
        .bind(total)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(self.pool)
        .await?;

        Order::try_from(row)
    }

    /// All orders placed by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// The most recent orders across all users, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(ADMIN_LIST_LIMIT)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Set an order's status. No transition prerequisites are enforced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID, and
    /// `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Order::try_from(row)
    }

    /// Count all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Total revenue across all orders.
    ///
    /// Uses a SQL `SUM` aggregate first; when the aggregate yields no
    /// numeric result (no rows), falls back to fetching the totals and
    /// summing them here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if both paths fail.
    pub async fn total_revenue(&self) -> Result<Decimal, RepositoryError> {
        let aggregate: Option<Decimal> = sqlx::query_scalar("SELECT SUM(total) FROM orders")
            .fetch_one(self.pool)
            .await?;

        if let Some(revenue) = aggregate {
            return Ok(revenue);
        }

        // Fallback: manual sum over the individual totals
        let totals: Vec<Decimal> = sqlx::query_scalar("SELECT total FROM orders")
            .fetch_all(self.pool)
            .await?;
        Ok(totals.into_iter().sum())
    }
}
