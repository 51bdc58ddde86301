//! Finalized Order Model

use serde::{Deserialize, Serialize};

use super::draft::{DeliveryDetails, Locations, PricingSummary, ReceiverDetails, SenderDetails};
use super::item::ItemDetails;

/// Lifecycle status of an order.
///
/// The client only ever writes `Draft` (implicitly, while assembling) and
/// `Pending` (at submission); the remaining transitions belong to the
/// external order store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Draft,
    Pending,
    Processing,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// No further transitions after these
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Immutable order record, owned by the external order store after creation.
/// The client only reads or subscribes once this exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Server-assigned document id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub customer_id: String,
    /// Human-facing tracking reference
    pub tracking_number: String,
    pub sender: SenderDetails,
    pub receiver: ReceiverDetails,
    pub items: Vec<ItemDetails>,
    pub delivery: DeliveryDetails,
    pub locations: Locations,
    pub pricing: PricingSummary,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&OrderStatus::InTransit).unwrap(), "\"IN_TRANSIT\"");
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"PENDING\"");
        let back: OrderStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(back, OrderStatus::Delivered);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InTransit.is_terminal());
    }
}
