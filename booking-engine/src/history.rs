//! Order history - read-back of submitted orders
//!
//! Finalized orders live in the external order store, keyed by generated
//! id and queried by customer and status. This is the thin typed reader
//! the history and tracking screens consume; all writes go through the
//! finalizer.

use std::sync::Arc;

use serde_json::{Value, json};

use shared::models::{Order, OrderStatus};

use crate::documents::{DocumentError, DocumentStore, ORDERS_COLLECTION};

/// Typed query surface over the orders collection
pub struct OrderHistory {
    documents: Arc<dyn DocumentStore>,
}

impl OrderHistory {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Orders belonging to a customer, optionally narrowed by status.
    /// Documents that fail to deserialize are skipped with a warning.
    pub async fn orders_for_customer(
        &self,
        customer_id: &str,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DocumentError> {
        let mut filter = json!({ "customer_id": customer_id });
        if let Some(status) = status {
            filter["status"] = serde_json::to_value(status).unwrap_or(Value::Null);
        }

        let docs = self.documents.query(ORDERS_COLLECTION, filter).await?;
        let mut orders = Vec::with_capacity(docs.len());
        for doc in docs {
            match serde_json::from_value::<Order>(doc) {
                Ok(order) => orders.push(order),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed order document");
                }
            }
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::MemoryDocumentStore;
    use shared::models::{
        DeliveryDetails, Locations, PricingSummary, ReceiverDetails, SenderDetails,
    };
    use shared::util::now_millis;

    fn order(customer_id: &str, status: OrderStatus) -> Order {
        Order {
            id: None,
            customer_id: customer_id.to_string(),
            tracking_number: "TRK-1".to_string(),
            sender: SenderDetails::default(),
            receiver: ReceiverDetails::default(),
            items: Vec::new(),
            delivery: DeliveryDetails::default(),
            locations: Locations::default(),
            pricing: PricingSummary::default(),
            status,
            created_at: now_millis(),
            updated_at: now_millis(),
        }
    }

    #[tokio::test]
    async fn test_filters_by_customer_and_status() {
        let documents = Arc::new(MemoryDocumentStore::new());
        for order in [
            order("u1", OrderStatus::Pending),
            order("u1", OrderStatus::Delivered),
            order("u2", OrderStatus::Pending),
        ] {
            documents
                .create(ORDERS_COLLECTION, serde_json::to_value(&order).unwrap())
                .await
                .unwrap();
        }

        let history = OrderHistory::new(documents);
        let all = history.orders_for_customer("u1", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let pending = history
            .orders_for_customer("u1", Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, OrderStatus::Pending);
        assert!(pending[0].id.is_some(), "server-assigned id comes back");
    }

    #[tokio::test]
    async fn test_malformed_documents_skipped() {
        let documents = Arc::new(MemoryDocumentStore::new());
        documents
            .create(
                ORDERS_COLLECTION,
                serde_json::to_value(order("u1", OrderStatus::Pending)).unwrap(),
            )
            .await
            .unwrap();
        documents
            .create(ORDERS_COLLECTION, json!({ "customer_id": "u1", "garbage": true }))
            .await
            .unwrap();

        let history = OrderHistory::new(documents);
        let orders = history.orders_for_customer("u1", None).await.unwrap();
        assert_eq!(orders.len(), 1, "the malformed document is skipped, not fatal");
    }
}
