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
    entities::company::{self, Entity as CompanyEntity},
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCompanyInput {
    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyInput {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

/// Customer companies that orders and bills are raised against.
#[derive(Clone)]
pub struct CompanyService {
    db: Arc<DbPool>,
}

impl CompanyService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_company(
        &self,
        input: CreateCompanyInput,
    ) -> Result<company::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let active = company::ActiveModel {
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
            error!("Failed to create company: {}", e);
            ServiceError::db_error(e)
        })?;

        info!(company_id = %created.id, "company created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_company(
        &self,
        company_id: Uuid,
    ) -> Result<Option<company::Model>, ServiceError> {
        CompanyEntity::find_by_id(company_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_companies(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<company::Model>, u64), ServiceError> {
        let paginator = CompanyEntity::find()
            .order_by_asc(company::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let companies = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((companies, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_company(
        &self,
        company_id: Uuid,
        input: UpdateCompanyInput,
    ) -> Result<company::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let company = CompanyEntity::find_by_id(company_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Company {} not found", company_id)))?;

        let mut active: company::ActiveModel = company.into();
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
        info!(company_id = %company_id, "company updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_company(&self, company_id: Uuid) -> Result<(), ServiceError> {
        let company = CompanyEntity::find_by_id(company_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Company {} not found", company_id)))?;

        company.delete(&*self.db).await.map_err(ServiceError::db_error)?;
        info!(company_id = %company_id, "company deleted");
        Ok(())
    }
}
