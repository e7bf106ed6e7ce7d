//! Pricing settings singleton.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The one global pricing-configuration record consulted at checkout.
///
/// Exactly one row exists; it is lazily created with [`Settings::default`]
/// values on first read. Handlers fetch it per request from the store
/// rather than caching it process-wide, so an admin update takes effect on
/// the next checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Flat delivery fee added to every order.
    pub delivery_fee: Decimal,
    /// Percentage discount applied once the subtotal reaches the threshold.
    pub discount_percent: Decimal,
    /// Subtotal threshold for the discount.
    pub min_order_for_discount: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::from(10),
            discount_percent: Decimal::ZERO,
            min_order_for_discount: Decimal::from(100),
        }
    }
}
