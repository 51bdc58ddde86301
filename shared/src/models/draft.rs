//! Order Draft Model
//!
//! The single work-in-progress order assembled across wizard steps. Each
//! top-level section is updated independently; the `pricing` block and
//! `delivery.fee` are derived and written only by the engine's repricing
//! path, never by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ItemDetails;
use super::order::OrderStatus;
use super::vehicle::VehicleType;
use crate::util::now_millis;

/// Country stamped on fresh location templates
pub const DEFAULT_COUNTRY: &str = "Nigeria";

/// How the receiver takes possession of the shipment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    /// Courier delivers to the receiver's address
    #[default]
    Delivery,
    /// Receiver collects from a pickup center
    Pickup,
}

/// Sender contact section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SenderDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub state: String,
}

/// Receiver contact section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReceiverDetails {
    pub name: String,
    pub phone: String,
    pub state: String,
    pub delivery_method: DeliveryMethod,
    /// Required when `delivery_method` is DELIVERY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Required when `delivery_method` is PICKUP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_center: Option<String>,
}

/// Pickup schedule and vehicle choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeliveryDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_pickup: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vehicle: VehicleType,
    /// Delivery fee in currency units - derived, kept in lockstep with `pricing`
    #[serde(default)]
    pub fee: f64,
}

/// Structured address used for display and the (external) routing layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state: String,
    pub country: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            address: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Denormalized pickup/delivery addresses, maintained by the assembler from
/// the sender and receiver sections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Locations {
    pub pickup: Location,
    pub delivery: Location,
}

/// Derived pricing block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PricingSummary {
    /// Sum of declared item value x quantity over all items
    pub item_value: f64,
    /// Tiered weight fee, whole currency units
    pub delivery_fee: f64,
    /// item_value + delivery_fee
    pub total: f64,
}

/// Draft bookkeeping; `status` stays `Draft` until the finalizer runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftMeta {
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Work-in-progress order, exactly one per authenticated user.
///
/// `sender` and `receiver` are optional until their wizard steps run; the
/// remaining five sections must all be present for a persisted draft to
/// deserialize - a payload missing any of them fails structural validation
/// and is treated as absent by the draft store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverDetails>,
    pub items: Vec<ItemDetails>,
    pub delivery: DeliveryDetails,
    pub locations: Locations,
    pub pricing: PricingSummary,
    pub order_details: DraftMeta,
}

impl OrderDraft {
    /// Fresh template for a new order
    pub fn empty() -> Self {
        let now = now_millis();
        Self {
            sender: None,
            receiver: None,
            items: Vec::new(),
            delivery: DeliveryDetails::default(),
            locations: Locations::default(),
            pricing: PricingSummary::default(),
            order_details: DraftMeta {
                status: OrderStatus::Draft,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Apply a partial update.
    ///
    /// Present sections replace the current value wholesale; `order_details`
    /// merges key-by-key. Does not stamp `updated_at` - the draft store owns
    /// that on persist.
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(sender) = patch.sender {
            self.sender = Some(sender);
        }
        if let Some(receiver) = patch.receiver {
            self.receiver = Some(receiver);
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(delivery) = patch.delivery {
            self.delivery = delivery;
        }
        if let Some(locations) = patch.locations {
            self.locations = locations;
        }
        if let Some(pricing) = patch.pricing {
            self.pricing = pricing;
        }
        if let Some(meta) = patch.order_details {
            if let Some(status) = meta.status {
                self.order_details.status = status;
            }
            if let Some(created_at) = meta.created_at {
                self.order_details.created_at = created_at;
            }
            if let Some(updated_at) = meta.updated_at {
                self.order_details.updated_at = updated_at;
            }
        }
    }
}

/// Partial update merged onto a draft
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Locations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<DraftMetaPatch>,
}

/// Key-by-key patch for the `order_details` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DraftMetaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}
