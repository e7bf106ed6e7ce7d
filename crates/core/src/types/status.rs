//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The wire and storage representation uses the human-readable labels
/// ("Payment Completed", not `payment_completed`) for compatibility with
/// existing clients. No transition prerequisites are enforced: an admin may
/// move an order between any two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    #[serde(rename = "Payment Completed")]
    PaymentCompleted,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::PaymentCompleted,
        Self::Processing,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The storage/wire label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PaymentCompleted => "Payment Completed",
            Self::Processing => "Processing",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Payment Completed" => Ok(Self::PaymentCompleted),
            "Processing" => Ok(Self::Processing),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PaymentCompleted).unwrap(),
            "\"Payment Completed\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"Delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }
}
