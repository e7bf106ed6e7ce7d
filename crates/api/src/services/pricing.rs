//! Checkout pricing.
//!
//! The server recomputes every money amount from the line items and the
//! stored pricing settings, then cross-checks any client-claimed figures.
//! The legacy trust-client mode persists the client's figures unchanged and
//! exists only for compatibility with old storefront builds.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::PricingMode;
use crate::models::{LineItem, Settings};

/// Money amounts are rounded to two decimal places.
const MONEY_DP: u32 = 2;

/// Errors from checkout pricing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The cart had no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// A line item had a zero quantity.
    #[error("Invalid quantity for item '{item}'")]
    InvalidQuantity { item: String },

    /// A line item had a negative unit price.
    #[error("Invalid price for item '{item}'")]
    InvalidPrice { item: String },

    /// An amount overflowed the money representation.
    #[error("Order amount out of range")]
    AmountOutOfRange,

    /// A client-claimed amount disagrees with the recomputed one.
    #[error("{field} mismatch: claimed {claimed}, computed {computed}")]
    Mismatch {
        field: &'static str,
        claimed: Decimal,
        computed: Decimal,
    },

    /// Trust-client mode needs the client to send all three totals.
    #[error("Order totals are required")]
    MissingTotals,
}

/// The money amounts the client claims for its cart, if it sent any.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimedTotals {
    pub subtotal: Option<Decimal>,
    pub delivery_fee: Option<Decimal>,
    pub total: Option<Decimal>,
}

/// The amounts an order is persisted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedOrder {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

/// Price a cart under the configured mode.
///
/// # Errors
///
/// Returns a [`PricingError`] when the cart is empty or malformed, or (in
/// recompute mode) when a client-claimed amount disagrees with the
/// server-computed one.
pub fn price_order(
    items: &[LineItem],
    claimed: &ClaimedTotals,
    settings: &Settings,
    mode: PricingMode,
) -> Result<PricedOrder, PricingError> {
    if items.is_empty() {
        return Err(PricingError::EmptyCart);
    }

    match mode {
        PricingMode::Recompute => recompute(items, claimed, settings),
        PricingMode::TrustClient => trust_client(claimed),
    }
}

fn recompute(
    items: &[LineItem],
    claimed: &ClaimedTotals,
    settings: &Settings,
) -> Result<PricedOrder, PricingError> {
    let mut subtotal = Decimal::ZERO;
    for item in items {
        if item.quantity == 0 {
            return Err(PricingError::InvalidQuantity {
                item: item.product_id.clone(),
            });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(PricingError::InvalidPrice {
                item: item.product_id.clone(),
            });
        }

        let line_total = item
            .computed_total()
            .ok_or(PricingError::AmountOutOfRange)?;
        if let Some(claimed_line) = item.line_total
            && claimed_line != line_total
        {
            return Err(PricingError::Mismatch {
                field: "lineTotal",
                claimed: claimed_line,
                computed: line_total,
            });
        }
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(PricingError::AmountOutOfRange)?;
    }
    let subtotal = subtotal.round_dp(MONEY_DP);

    let discount = if settings.discount_percent > Decimal::ZERO
        && subtotal >= settings.min_order_for_discount
    {
        subtotal
            .checked_mul(settings.discount_percent)
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::AmountOutOfRange)?
            .round_dp(MONEY_DP)
    } else {
        Decimal::ZERO
    };

    let delivery_fee = settings.delivery_fee;
    let total = subtotal
        .checked_sub(discount)
        .and_then(|t| t.checked_add(delivery_fee))
        .ok_or(PricingError::AmountOutOfRange)?;

    check_claim("subtotal", claimed.subtotal, subtotal)?;
    check_claim("deliveryFee", claimed.delivery_fee, delivery_fee)?;
    check_claim("total", claimed.total, total)?;

    Ok(PricedOrder {
        subtotal,
        discount,
        delivery_fee,
        total,
    })
}

fn trust_client(claimed: &ClaimedTotals) -> Result<PricedOrder, PricingError> {
    let (Some(subtotal), Some(delivery_fee), Some(total)) =
        (claimed.subtotal, claimed.delivery_fee, claimed.total)
    else {
        return Err(PricingError::MissingTotals);
    };

    Ok(PricedOrder {
        subtotal,
        discount: Decimal::ZERO,
        delivery_fee,
        total,
    })
}

fn check_claim(
    field: &'static str,
    claimed: Option<Decimal>,
    computed: Decimal,
) -> Result<(), PricingError> {
    if let Some(claimed) = claimed
        && claimed != computed
    {
        return Err(PricingError::Mismatch {
            field,
            claimed,
            computed,
        });
    }
    Ok(())
}
