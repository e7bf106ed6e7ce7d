//! Settings repository for the pricing-configuration singleton.
//!
//! Exactly one row exists, keyed by a constant ID. Reads lazily create the
//! row with default values; the read-then-insert is two independent calls,
//! which is harmless here because the insert ignores a concurrent winner.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Settings;

/// Fixed primary key of the singleton row.
const SINGLETON_ID: i32 = 1;

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    delivery_fee: Decimal,
    discount_percent: Decimal,
    min_order_for_discount: Decimal,
}

impl From<SettingsRow> for Settings {
    fn from(row: SettingsRow) -> Self {
        Self {
            delivery_fee: row.delivery_fee,
            discount_percent: row.discount_percent,
            min_order_for_discount: row.min_order_for_discount,
        }
    }
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings record, creating it with defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self) -> Result<Settings, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT delivery_fee, discount_percent, min_order_for_discount \
             FROM settings WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(Settings::from(row));
        }

        let defaults = Settings::default();
        let row = sqlx::query_as::<_, SettingsRow>(
            "INSERT INTO settings (id, delivery_fee, discount_percent, min_order_for_discount) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET id = settings.id \
             RETURNING delivery_fee, discount_percent, min_order_for_discount",
        )
        .bind(SINGLETON_ID)
        .bind(defaults.delivery_fee)
        .bind(defaults.discount_percent)
        .bind(defaults.min_order_for_discount)
        .fetch_one(self.pool)
        .await?;

        Ok(Settings::from(row))
    }

    /// Partially update the settings record. `None` leaves a field
    /// unchanged. The row is created with defaults first if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        delivery_fee: Option<Decimal>,
        discount_percent: Option<Decimal>,
        min_order_for_discount: Option<Decimal>,
    ) -> Result<Settings, RepositoryError> {
        // Lazy-create so the partial update always has a row to hit
        self.get_or_create().await?;

        let row = sqlx::query_as::<_, SettingsRow>(
            "UPDATE settings SET \
                 delivery_fee = COALESCE($2, delivery_fee), \
                 discount_percent = COALESCE($3, discount_percent), \
                 min_order_for_discount = COALESCE($4, min_order_for_discount) \
             WHERE id = $1 \
             RETURNING delivery_fee, discount_percent, min_order_for_discount",
        )
        .bind(SINGLETON_ID)
        .bind(delivery_fee)
        .bind(discount_percent)
        .bind(min_order_for_discount)
        .fetch_one(self.pool)
        .await?;

        Ok(Settings::from(row))
    }
}
