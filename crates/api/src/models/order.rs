//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use freshcart_core::{Email, OrderId, OrderStatus, UserId};

/// One line of a cart, denormalized into the order at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog reference. Opaque to the order; the product may be edited or
    /// deleted later without touching persisted orders.
    pub product_id: String,
    /// Product title snapshot.
    #[serde(default)]
    pub title: Option<String>,
    /// Unit price at order time.
    pub unit_price: Decimal,
    /// Quantity ordered.
    pub quantity: u32,
    /// Product image snapshot.
    #[serde(default)]
    pub image: Option<String>,
    /// `unit_price * quantity`. Supplied by the client in trust-client mode,
    /// recomputed otherwise.
    #[serde(default)]
    pub line_total: Option<Decimal>,
}

impl LineItem {
    /// `unit_price * quantity`, computed fresh from this line.
    ///
    /// Returns `None` when the product does not fit in a [`Decimal`]. Both
    /// fields come straight off the wire, so overflow is a client error,
    /// not a bug.
    #[must_use]
    pub fn computed_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// A persisted order.
///
/// `user` is an optional back-reference; `user_name`/`user_email` are a
/// snapshot taken at order time and survive later profile edits or account
/// deletion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<LineItem>,
    pub user: Option<UserId>,
    pub user_name: Option<String>,
    pub user_email: Option<Email>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_computed_total() {
        let item = LineItem {
            product_id: "p1".to_string(),
            title: None,
            unit_price: Decimal::from(20),
            quantity: 2,
            image: None,
            line_total: None,
        };
        assert_eq!(item.computed_total(), Some(Decimal::from(40)));
    }

    #[test]
    fn test_line_item_computed_total_overflow_is_none() {
        let item = LineItem {
            product_id: "p1".to_string(),
            title: None,
            unit_price: Decimal::MAX,
            quantity: 2,
            image: None,
            line_total: None,
        };
        assert_eq!(item.computed_total(), None);
    }

    #[test]
    fn test_line_item_wire_format_is_camel_case() {
        let item: LineItem =
            serde_json::from_str(r#"{"productId":"p1","unitPrice":"20","quantity":2}"#).unwrap();
        assert_eq!(item.product_id, "p1");
        assert_eq!(item.unit_price, Decimal::from(20));
        assert_eq!(item.title, None);
    }

    #[test]
    fn test_order_serializes_status_label() {
        let order = Order {
            id: OrderId::new(1),
            items: vec![],
            user: None,
            user_name: None,
            user_email: None,
            subtotal: Decimal::from(40),
            delivery_fee: Decimal::from(10),
            total: Decimal::from(50),
            status: OrderStatus::PaymentCompleted,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "Payment Completed");
        assert_eq!(json["deliveryFee"], "10");
        assert!(json["user"].is_null());
    }
}
