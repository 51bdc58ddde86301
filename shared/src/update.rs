//! Section-update commands
//!
//! Every wizard step contributes its data to the draft through exactly one
//! of these commands, dispatched via the assembler's `merge_section`. The
//! tagged union replaces the untyped partial-JSON merges the mobile client
//! used to send: any section can still update independently, but each
//! payload is fully typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ItemDetails, ReceiverDetails, SenderDetails, VehicleType};

/// Item list operation carried by `UpdateItems`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemsOp {
    /// Append a new item line
    Add { item: ItemDetails },
    /// Replace the line at `index` (an edit)
    Replace { index: usize, item: ItemDetails },
    /// Drop the line at `index`
    Remove { index: usize },
}

/// Delivery step payload: schedule plus vehicle choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryUpdate {
    pub scheduled_pickup: DateTime<Utc>,
    pub vehicle: VehicleType,
}

/// One wizard step's contribution to the draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionUpdate {
    UpdateSender { sender: SenderDetails },
    UpdateReceiver { receiver: ReceiverDetails },
    UpdateItems { op: ItemsOp },
    UpdateDelivery { delivery: DeliveryUpdate },
}
