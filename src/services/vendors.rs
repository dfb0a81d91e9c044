use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::vendor::{self, Entity as VendorEntity},
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateVendorInput {
    #[validate(length(min = 1, max = 200, message = "Vendor name is required"))]
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateVendorInput {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

/// Material suppliers.
#[derive(Clone)]
pub struct VendorService {
    db: Arc<DbPool>,
}

impl VendorService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_vendor(
        &self,
        input: CreateVendorInput,
    ) -> Result<vendor::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let active = vendor::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            contact_person: Set(input.contact_person),
            phone: Set(input.phone),
            email: Set(input.email),
            address: Set(input.address),
            gst_number: Set(input.gst_number),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = active.insert(&*self.db).await.map_err(|e| {
            error!("Failed to create vendor: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(vendor_id = %created.id, "vendor created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_vendor(&self, vendor_id: Uuid) -> Result<Option<vendor::Model>, ServiceError> {
        VendorEntity::find_by_id(vendor_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_vendors(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<vendor::Model>, u64), ServiceError> {
        let paginator = VendorEntity::find()
            .order_by_asc(vendor::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let vendors = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((vendors, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_vendor(
        &self,
        vendor_id: Uuid,
        input: UpdateVendorInput,
    ) -> Result<vendor::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let vendor = VendorEntity::find_by_id(vendor_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendor {} not found", vendor_id)))?;

        let mut active: vendor::ActiveModel = vendor.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(contact_person) = input.contact_person {
            active.contact_person = Set(Some(contact_person));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(gst_number) = input.gst_number {
            active.gst_number = Set(Some(gst_number));
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(&*self.db).await.map_err(ServiceError::db_error)?;
        info!(vendor_id = %vendor_id, "vendor updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_vendor(&self, vendor_id: Uuid) -> Result<(), ServiceError> {
        let vendor = VendorEntity::find_by_id(vendor_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendor {} not found", vendor_id)))?;

        vendor.delete(&*self.db).await.map_err(ServiceError::db_error)?;
        info!(vendor_id = %vendor_id, "vendor deleted");
        Ok(())
    }
}
