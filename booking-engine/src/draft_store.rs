//! Draft store - the single in-progress order slot per authenticated user
//!
//! Exactly one draft exists at a time per user, under one fixed key.
//! Starting a new order overwrites any prior draft; there is no draft
//! history and no multi-draft support.

use std::sync::Arc;

use shared::models::{DraftPatch, OrderDraft};
use shared::util::now_millis;

use crate::storage::{KeyValueStore, StorageResult};

/// Key prefix for per-user draft slots
const DRAFT_KEY_PREFIX: &str = "draft:";

/// Durable holder of one work-in-progress order
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DraftStore {
    /// Handle scoped to one authenticated user's draft slot
    pub fn for_user(store: Arc<dyn KeyValueStore>, user_id: &str) -> Self {
        Self {
            store,
            key: format!("{DRAFT_KEY_PREFIX}{user_id}"),
        }
    }

    /// Load the current draft.
    ///
    /// A persisted payload that fails structural validation (corrupt JSON or
    /// a missing required section) is treated as absent, not repaired - the
    /// next save starts from a fresh template.
    pub fn get(&self) -> StorageResult<Option<OrderDraft>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<OrderDraft>(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding structurally invalid draft");
                Ok(None)
            }
        }
    }

    /// Merge a partial update onto the existing draft (or a fresh template)
    /// and persist the result atomically.
    ///
    /// Present sections replace wholesale, `order_details` merges key-by-key
    /// (see [`OrderDraft::apply`]); `order_details.updated_at` is always
    /// stamped here. Returns the merged draft.
    pub fn save(&self, patch: DraftPatch) -> StorageResult<OrderDraft> {
        let mut draft = self.get()?.unwrap_or_else(OrderDraft::empty);
        draft.apply(patch);
        draft.order_details.updated_at = now_millis();

        let raw = serde_json::to_string(&draft)?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, "draft saved");
        Ok(draft)
    }

    /// Remove the draft entirely
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(&self.key)?;
        tracing::debug!(key = %self.key, "draft cleared");
        Ok(())
    }

    /// Write a fresh empty template, discarding any previous draft
    pub fn init_empty(&self) -> StorageResult<OrderDraft> {
        let draft = OrderDraft::empty();
        let raw = serde_json::to_string(&draft)?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, "draft initialized");
        Ok(draft)
    }
}
