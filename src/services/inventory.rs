use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    costing::MaterialAttributes,
    db::DbPool,
    entities::inventory_item::{self, Entity as InventoryItemEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateMaterialInput {
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    pub color: Option<String>,
    pub gsm: Option<i32>,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub purchase_rate: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub quantity_in_stock: Option<Decimal>,
    pub vendor_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub gsm: Option<i32>,
    pub unit: Option<String>,
    pub purchase_rate: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub vendor_id: Option<Uuid>,
}

/// Raw-material inventory. The costing engine reads rates and roll widths
/// from here; purchases and manual adjustments move stock.
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_material(
        &self,
        input: CreateMaterialInput,
    ) -> Result<inventory_item::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db;
        let now = Utc::now();

        let material = inventory_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            color: Set(input.color),
            gsm: Set(input.gsm),
            unit: Set(input.unit),
            purchase_rate: Set(input.purchase_rate.unwrap_or(Decimal::ZERO)),
            roll_width: Set(input.roll_width),
            quantity_in_stock: Set(input.quantity_in_stock.unwrap_or(Decimal::ZERO)),
            vendor_id: Set(input.vendor_id),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = material.insert(db).await.map_err(|e| {
            error!("Failed to create material: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(material_id = %created.id, name = %created.name, "material created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_material(
        &self,
        material_id: Uuid,
    ) -> Result<Option<inventory_item::Model>, ServiceError> {
        InventoryItemEntity::find_by_id(material_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_materials(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<inventory_item::Model>, u64), ServiceError> {
        let paginator = InventoryItemEntity::find()
            .order_by_asc(inventory_item::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let materials = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((materials, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_material(
        &self,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> Result<inventory_item::Model, ServiceError> {
        let db = &*self.db;

        let material = InventoryItemEntity::find_by_id(material_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", material_id)))?;

        let mut active: inventory_item::ActiveModel = material.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(color) = input.color {
            active.color = Set(Some(color));
        }
        if let Some(gsm) = input.gsm {
            active.gsm = Set(Some(gsm));
        }
        if let Some(unit) = input.unit {
            active.unit = Set(unit);
        }
        if let Some(rate) = input.purchase_rate {
            active.purchase_rate = Set(rate);
        }
        if let Some(roll_width) = input.roll_width {
            active.roll_width = Set(Some(roll_width));
        }
        if let Some(vendor_id) = input.vendor_id {
            active.vendor_id = Set(Some(vendor_id));
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(db).await.map_err(ServiceError::db_error)?;
        info!(material_id = %material_id, "material updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_material(&self, material_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db;

        let material = InventoryItemEntity::find_by_id(material_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", material_id)))?;

        material.delete(db).await.map_err(ServiceError::db_error)?;
        info!(material_id = %material_id, "material deleted");
        Ok(())
    }

    /// Moves stock by `delta` (negative for consumption), emitting a
    /// StockAdjusted event.
    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        material_id: Uuid,
        delta: Decimal,
        reason: &str,
    ) -> Result<inventory_item::Model, ServiceError> {
        let db = &*self.db;

        let material = InventoryItemEntity::find_by_id(material_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", material_id)))?;

        let new_quantity = material.quantity_in_stock + delta;
        if new_quantity < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(format!(
                "Stock for material {} cannot go below zero (have {}, delta {})",
                material_id, material.quantity_in_stock, delta
            )));
        }

        let mut active: inventory_item::ActiveModel = material.into();
        active.quantity_in_stock = Set(new_quantity);
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::StockAdjusted {
                    material_id,
                    delta,
                    reason: reason.to_string(),
                })
                .await
            {
                tracing::warn!(material_id = %material_id, error = %e, "failed to send stock event");
            }
        }

        info!(material_id = %material_id, %delta, reason, "stock adjusted");
        Ok(updated)
    }

    /// Batched material lookup for the component set builder: one query for
    /// every referenced id, never one query per component.
    #[instrument(skip(self, ids))]
    pub async fn material_attributes(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, MaterialAttributes>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = InventoryItemEntity::find()
            .filter(inventory_item::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.id,
                    MaterialAttributes {
                        id: row.id,
                        name: row.name,
                        purchase_rate: row.purchase_rate,
                        roll_width: row.roll_width,
                    },
                )
            })
            .collect())
    }
}
