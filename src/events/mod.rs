use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Sends domain events onto the in-process channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Domain events emitted by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Order events
    OrderCreated(Uuid),
    OrderUpdated(Uuid),
    OrderCancelled(Uuid),
    OrderComponentsFailed {
        order_id: Uuid,
        component_count: usize,
    },

    // Inventory events
    StockAdjusted {
        material_id: Uuid,
        delta: Decimal,
        reason: String,
    },
    PurchaseRecorded {
        purchase_id: Uuid,
        material_id: Uuid,
        quantity: Decimal,
    },

    // Production events
    JobCardCreated(Uuid),
    JobCardStatusChanged {
        job_card_id: Uuid,
        stage: String,
        old_status: String,
        new_status: String,
    },

    // Billing events
    BillIssued(Uuid),
    BillPaid(Uuid),
}

/// Background task draining the event channel. Events are observability
/// signals here, never a correctness dependency; losing one costs a log
/// line, nothing else.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");

    while let Some(event) = receiver.recv().await {
        match &event {
            Event::OrderCreated(id) => info!(order_id = %id, "order created"),
            Event::OrderUpdated(id) => info!(order_id = %id, "order updated"),
            Event::OrderCancelled(id) => info!(order_id = %id, "order cancelled"),
            Event::OrderComponentsFailed {
                order_id,
                component_count,
            } => warn!(
                order_id = %order_id,
                component_count,
                "order persisted without its components"
            ),
            Event::StockAdjusted {
                material_id,
                delta,
                reason,
            } => info!(material_id = %material_id, %delta, reason, "stock adjusted"),
            Event::PurchaseRecorded {
                purchase_id,
                material_id,
                quantity,
            } => info!(
                purchase_id = %purchase_id,
                material_id = %material_id,
                %quantity,
                "purchase recorded"
            ),
            Event::JobCardCreated(id) => info!(job_card_id = %id, "job card created"),
            Event::JobCardStatusChanged {
                job_card_id,
                stage,
                old_status,
                new_status,
            } => info!(
                job_card_id = %job_card_id,
                stage,
                old_status,
                new_status,
                "job card status changed"
            ),
            Event::BillIssued(id) => info!(bill_id = %id, "bill issued"),
            Event::BillPaid(id) => info!(bill_id = %id, "bill paid"),
        }
    }

    info!("Event processor stopped");
}
