//! Draft assembler - the single entry point for wizard-step merges
//!
//! Every step goes through [`DraftAssembler::merge_section`]:
//!
//! 1. Load the current draft (or a fresh template)
//! 2. Run the matching section validator; any error rejects the merge with
//!    no partial write
//! 3. Merge the section
//! 4. Recompute `pricing` and `delivery.fee` in the same patch whenever the
//!    step touched pricing inputs (items, vehicle) - derived fields are
//!    never persisted out of sync with their inputs
//! 5. Persist once through the draft store
//!
//! The assembler assumes a single in-flight merge per user session; there
//! is no internal locking and concurrent calls resolve last-writer-wins at
//! whole-section granularity.

use chrono::Utc;
use thiserror::Error;

use shared::models::{
    DeliveryDetails, DraftPatch, ItemDetails, OrderDraft, ReceiverDetails, SenderDetails,
    VehicleType,
};
use shared::update::{DeliveryUpdate, ItemsOp, SectionUpdate};

use crate::config::BookingConfig;
use crate::draft_store::DraftStore;
use crate::pricing;
use crate::storage::StorageError;
use crate::validators;

/// Merge failures; the persisted draft is untouched when any of these is
/// returned (storage write errors excepted, where only the failed write is
/// indeterminate)
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("total weight {total_kg:.1}kg exceeds the {} capacity of {max_kg:.0}kg", vehicle.label())]
    CapacityExceeded {
        vehicle: VehicleType,
        total_kg: f64,
        max_kg: f64,
    },

    #[error("no item at index {0}")]
    ItemNotFound(usize),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type MergeResult<T> = Result<T, MergeError>;

/// Orchestrates section merges against one user's draft slot
pub struct DraftAssembler {
    store: DraftStore,
    config: BookingConfig,
}

impl DraftAssembler {
    pub fn new(store: DraftStore, config: BookingConfig) -> Self {
        Self { store, config }
    }

    /// Begin a new order, discarding any previous draft
    pub fn start(&self) -> MergeResult<OrderDraft> {
        Ok(self.store.init_empty()?)
    }

    /// Abandon the draft entirely
    pub fn cancel(&self) -> MergeResult<()> {
        Ok(self.store.clear()?)
    }

    /// Validate and merge one wizard step.
    ///
    /// Returns the merged draft; a rejected merge returns the full error
    /// list and leaves the persisted draft unchanged.
    pub fn merge_section(&self, update: SectionUpdate) -> MergeResult<OrderDraft> {
        let draft = self.store.get()?.unwrap_or_else(OrderDraft::empty);

        let patch = match update {
            SectionUpdate::UpdateSender { sender } => self.merge_sender(&draft, sender)?,
            SectionUpdate::UpdateReceiver { receiver } => self.merge_receiver(&draft, receiver)?,
            SectionUpdate::UpdateItems { op } => self.merge_items(&draft, op)?,
            SectionUpdate::UpdateDelivery { delivery } => self.merge_delivery(&draft, delivery)?,
        };

        let merged = self.store.save(patch)?;
        tracing::debug!(
            items = merged.items.len(),
            total = merged.pricing.total,
            "section merged"
        );
        Ok(merged)
    }

    fn merge_sender(&self, draft: &OrderDraft, sender: SenderDetails) -> MergeResult<DraftPatch> {
        let messages = validators::validate_sender(&sender);
        if !messages.is_empty() {
            return Err(MergeError::Validation { messages });
        }

        // Keep the denormalized pickup location in step with the sender
        let mut locations = draft.locations.clone();
        locations.pickup.address = sender.address.clone();
        locations.pickup.state = sender.state.clone();

        Ok(DraftPatch {
            sender: Some(sender),
            locations: Some(locations),
            ..Default::default()
        })
    }

    fn merge_receiver(
        &self,
        draft: &OrderDraft,
        receiver: ReceiverDetails,
    ) -> MergeResult<DraftPatch> {
        let messages = validators::validate_receiver(&receiver);
        if !messages.is_empty() {
            return Err(MergeError::Validation { messages });
        }

        let mut locations = draft.locations.clone();
        locations.delivery.address = receiver
            .address
            .clone()
            .or_else(|| receiver.pickup_center.clone())
            .unwrap_or_default();
        locations.delivery.state = receiver.state.clone();

        Ok(DraftPatch {
            receiver: Some(receiver),
            locations: Some(locations),
            ..Default::default()
        })
    }

    fn merge_items(&self, draft: &OrderDraft, op: ItemsOp) -> MergeResult<DraftPatch> {
        let vehicle = draft.delivery.vehicle;
        let mut items = draft.items.clone();

        match op {
            ItemsOp::Add { item } => {
                self.check_item(&item, &items, None, vehicle)?;
                items.push(item);
            }
            ItemsOp::Replace { index, item } => {
                if index >= items.len() {
                    return Err(MergeError::ItemNotFound(index));
                }
                self.check_item(&item, &items, Some(index), vehicle)?;
                items[index] = item;
            }
            ItemsOp::Remove { index } => {
                if index >= items.len() {
                    return Err(MergeError::ItemNotFound(index));
                }
                items.remove(index);
            }
        }

        Ok(repriced_patch(items, draft.delivery.clone()))
    }

    fn merge_delivery(
        &self,
        draft: &OrderDraft,
        delivery: DeliveryUpdate,
    ) -> MergeResult<DraftPatch> {
        let mut messages =
            validators::validate_schedule(delivery.scheduled_pickup, Utc::now(), &self.config);

        // A vehicle change must still carry the already-accepted cargo
        let total_kg = pricing::total_weight_kg(&draft.items);
        let max_kg = delivery.vehicle.max_weight_kg();
        if total_kg > max_kg {
            if messages.is_empty() {
                return Err(MergeError::CapacityExceeded {
                    vehicle: delivery.vehicle,
                    total_kg,
                    max_kg,
                });
            }
            messages.push(format!(
                "current items weigh {:.1}kg, over the {} capacity of {:.0}kg",
                total_kg,
                delivery.vehicle.label(),
                max_kg
            ));
        }
        if !messages.is_empty() {
            return Err(MergeError::Validation { messages });
        }

        let details = DeliveryDetails {
            scheduled_pickup: Some(delivery.scheduled_pickup),
            vehicle: delivery.vehicle,
            fee: 0.0, // overwritten by the reprice below
        };
        Ok(repriced_patch(draft.items.clone(), details))
    }

    /// Item validation, surfacing a lone capacity breach as the structured
    /// error and anything else as the collected message list
    fn check_item(
        &self,
        item: &ItemDetails,
        existing: &[ItemDetails],
        replacing: Option<usize>,
        vehicle: VehicleType,
    ) -> MergeResult<()> {
        let messages = validators::validate_item(item, existing, replacing, vehicle, &self.config);
        if messages.is_empty() {
            return Ok(());
        }
        if messages.len() == 1
            && let Some(violation) = validators::capacity_violation(existing, replacing, item, vehicle)
        {
            return Err(MergeError::CapacityExceeded {
                vehicle: violation.vehicle,
                total_kg: violation.total_kg,
                max_kg: violation.max_kg,
            });
        }
        Err(MergeError::Validation { messages })
    }
}

/// Items or vehicle changed: pricing and the delivery fee land in the same
/// patch so derived fields can never persist out of sync with their inputs
fn repriced_patch(items: Vec<ItemDetails>, mut delivery: DeliveryDetails) -> DraftPatch {
    let quote = pricing::quote(&items);
    delivery.fee = quote.delivery_fee;
    DraftPatch {
        items: Some(items),
        delivery: Some(delivery),
        pricing: Some(quote),
        ..Default::default()
    }
}
