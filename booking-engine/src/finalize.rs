//! Order finalizer - converts a complete draft into an immutable order
//!
//! Submission is the only terminal non-error transition of a draft:
//! `absent -> draft(partial) -> draft(complete) -> [submitted, cleared]`.
//! Every section re-validates here with the same validators the wizard
//! used, the pricing recomputes from scratch (persisted derived fields are
//! never trusted at finalize time), and the draft is cleared only after
//! the order store accepted the document. A failed submission leaves the
//! draft intact so the user can retry without redoing any step.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use shared::models::{DeliveryDetails, Order, OrderStatus};
use shared::util::{now_millis, tracking_number};

use crate::config::BookingConfig;
use crate::documents::{DocumentError, DocumentStore, ORDERS_COLLECTION};
use crate::draft_store::DraftStore;
use crate::pricing;
use crate::storage::StorageError;
use crate::validators;

/// Active-session collaborator exposing the authenticated customer
pub trait Session: Send + Sync {
    fn user_id(&self) -> Option<String>;
}

/// Fixed-identity session for tests and single-user clients
pub struct StaticSession(pub String);

impl Session for StaticSession {
    fn user_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Submission failures. For every variant except a successful create
/// followed by a failed clear, the draft is left untouched.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no draft to submit")]
    NoDraft,

    #[error("no authenticated user")]
    NoSession,

    #[error("validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("submission failed: {0}")]
    Submission(#[from] DocumentError),
}

pub type SubmitResult<T> = Result<T, SubmitError>;

/// Validates, prices and submits the completed draft
pub struct OrderFinalizer {
    documents: Arc<dyn DocumentStore>,
    session: Arc<dyn Session>,
    config: BookingConfig,
}

impl OrderFinalizer {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        session: Arc<dyn Session>,
        config: BookingConfig,
    ) -> Self {
        Self {
            documents,
            session,
            config,
        }
    }

    /// Submit the draft as an immutable order, returning the
    /// server-assigned order id. Clears the draft on success only.
    pub async fn submit(&self, store: &DraftStore) -> SubmitResult<String> {
        let draft = store.get()?.ok_or(SubmitError::NoDraft)?;
        let customer_id = self.session.user_id().ok_or(SubmitError::NoSession)?;

        let messages = self.validate_complete(&draft);
        if !messages.is_empty() {
            return Err(SubmitError::Validation { messages });
        }

        // Never trust persisted derived fields at finalize time
        let fresh = pricing::quote(&draft.items);
        if !pricing::pricing_eq(&fresh, &draft.pricing) {
            tracing::warn!(
                stored_total = draft.pricing.total,
                fresh_total = fresh.total,
                "stale draft pricing recomputed at submission"
            );
        }

        let (Some(sender), Some(receiver), Some(pickup)) = (
            draft.sender.clone(),
            draft.receiver.clone(),
            draft.delivery.scheduled_pickup,
        ) else {
            // validate_complete already reported the missing sections
            return Err(SubmitError::Validation {
                messages: vec!["draft is incomplete".to_string()],
            });
        };

        let now = now_millis();
        let order = Order {
            id: None,
            customer_id,
            tracking_number: tracking_number(),
            sender,
            receiver,
            items: draft.items.clone(),
            delivery: DeliveryDetails {
                scheduled_pickup: Some(pickup),
                vehicle: draft.delivery.vehicle,
                fee: fresh.delivery_fee,
            },
            locations: draft.locations.clone(),
            pricing: fresh,
            status: OrderStatus::Pending,
            // The order store overwrites these with real server time
            created_at: now,
            updated_at: now,
        };

        let doc = serde_json::to_value(&order).map_err(StorageError::Serialization)?;
        let order_id = self.documents.create(ORDERS_COLLECTION, doc).await?;

        store.clear()?;
        tracing::info!(
            order_id = %order_id,
            tracking_number = %order.tracking_number,
            total = order.pricing.total,
            "order submitted, draft cleared"
        );
        Ok(order_id)
    }

    /// Re-validate every section of the draft, collecting all failures
    fn validate_complete(&self, draft: &shared::models::OrderDraft) -> Vec<String> {
        let mut messages = Vec::new();

        match &draft.sender {
            Some(sender) => messages.extend(validators::validate_sender(sender)),
            None => messages.push("sender details are required".to_string()),
        }
        match &draft.receiver {
            Some(receiver) => messages.extend(validators::validate_receiver(receiver)),
            None => messages.push("receiver details are required".to_string()),
        }

        if draft.items.is_empty() {
            messages.push("at least one item is required".to_string());
        }
        for (index, item) in draft.items.iter().enumerate() {
            // Re-run field checks per line; the whole-cargo capacity check
            // below covers weight, so each line validates standalone here
            for error in
                validators::validate_item(item, &[], None, draft.delivery.vehicle, &self.config)
            {
                messages.push(format!("item {}: {}", index + 1, error));
            }
        }
        let total_kg = pricing::total_weight_kg(&draft.items);
        let max_kg = draft.delivery.vehicle.max_weight_kg();
        if total_kg > max_kg {
            messages.push(format!(
                "total weight {:.1}kg exceeds the {} capacity of {:.0}kg",
                total_kg,
                draft.delivery.vehicle.label(),
                max_kg
            ));
        }

        match draft.delivery.scheduled_pickup {
            Some(pickup) => {
                messages.extend(validators::validate_schedule(pickup, Utc::now(), &self.config));
            }
            None => messages.push("pickup schedule is required".to_string()),
        }

        messages
    }
}
