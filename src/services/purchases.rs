use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::purchase::{self, Entity as PurchaseEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    services::inventory::InventoryService,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordPurchaseInput {
    pub vendor_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub invoice_number: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
}

/// Material purchases. Recording one moves stock up through the inventory
/// service so the stock ledger and purchase history stay in step.
#[derive(Clone)]
pub struct PurchaseService {
    db: Arc<DbPool>,
    inventory: Arc<InventoryService>,
    event_sender: Option<Arc<EventSender>>,
}

impl PurchaseService {
    pub fn new(
        db: Arc<DbPool>,
        inventory: Arc<InventoryService>,
        event_sender: Option<Arc<EventSender>>,
    ) -> Self {
        Self {
            db,
            inventory,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(material_id = %input.material_id))]
    pub async fn record_purchase(
        &self,
        input: RecordPurchaseInput,
    ) -> Result<purchase::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        if input.quantity <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Purchase quantity must be positive".to_string(),
            ));
        }
        if input.rate < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Purchase rate cannot be negative".to_string(),
            ));
        }

        // Material must exist before anything is written.
        self.inventory
            .get_material(input.material_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Material {} not found", input.material_id))
            })?;

        let now = Utc::now();
        let purchase_id = Uuid::new_v4();
        let total_amount = input.quantity * input.rate;

        let active = purchase::ActiveModel {
            id: Set(purchase_id),
            vendor_id: Set(input.vendor_id),
            material_id: Set(input.material_id),
            quantity: Set(input.quantity),
            rate: Set(input.rate),
            total_amount: Set(total_amount),
            invoice_number: Set(input.invoice_number),
            purchase_date: Set(input.purchase_date.unwrap_or(now)),
            created_at: Set(now),
        };

        let created = active.insert(&*self.db).await.map_err(|e| {
            error!("Failed to record purchase: {}", e);
            ServiceError::db_error(e)
        })?;

        self.inventory
            .adjust_stock(input.material_id, input.quantity, "purchase received")
            .await?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::PurchaseRecorded {
                    purchase_id,
                    material_id: input.material_id,
                    quantity: input.quantity,
                })
                .await
            {
                warn!(purchase_id = %purchase_id, error = %e, "failed to send purchase event");
            }
        }

        info!(purchase_id = %purchase_id, total_amount = %total_amount, "purchase recorded");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_purchase(
        &self,
        purchase_id: Uuid,
    ) -> Result<Option<purchase::Model>, ServiceError> {
        PurchaseEntity::find_by_id(purchase_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_purchases(
        &self,
        vendor_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<purchase::Model>, u64), ServiceError> {
        let mut query = PurchaseEntity::find().order_by_desc(purchase::Column::PurchaseDate);
        if let Some(vendor_id) = vendor_id {
            query = query.filter(purchase::Column::VendorId.eq(vendor_id));
        }

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let purchases = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((purchases, total))
    }
}
