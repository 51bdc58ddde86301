//! Document-store seam
//!
//! The remote collection-of-documents collaborator that owns finalized
//! orders. This subsystem only needs `create` (submission) and `query`
//! (history read-back); realtime subscriptions and everything else about
//! the transport stay with the hosting app.
//!
//! [`MemoryDocumentStore`] is the in-process fake used by tests and
//! offline development, with a failure switch for exercising the
//! submission error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

/// Collection holding finalized orders
pub const ORDERS_COLLECTION: &str = "orders";

/// Document-store collaborator failures
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document rejected: {0}")]
    Rejected(String),
}

/// Narrow async contract over the remote document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document, returning its server-assigned id
    async fn create(&self, collection: &str, doc: Value) -> Result<String, DocumentError>;

    /// Fetch documents whose fields equal every field of `filter`
    async fn query(&self, collection: &str, filter: Value) -> Result<Vec<Value>, DocumentError>;
}

/// In-memory document store for tests and offline development
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    fail_creates: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outages on `create`
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of a collection, for test inspection
    pub fn documents(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, mut doc: Value) -> Result<String, DocumentError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DocumentError::Unavailable("simulated outage".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        if let Value::Object(map) = &mut doc {
            map.insert("id".to_string(), Value::String(id.clone()));
        }
        self.collections
            .lock()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: Value) -> Result<Vec<Value>, DocumentError> {
        let filter = match filter {
            Value::Object(map) => map,
            _ => return Err(DocumentError::Rejected("filter must be an object".to_string())),
        };

        let collections = self.collections.lock();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| filter.iter().all(|(key, value)| doc.get(key) == Some(value)))
            .cloned()
            .collect())
    }
}
