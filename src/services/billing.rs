use chrono::Utc;
use rand::Rng;
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
    entities::bill::{self, Entity as BillEntity},
    entities::order::Entity as OrderEntity,
    errors::ServiceError,
    events::{Event, EventSender},
    retry::{is_duplicate_key, with_retry, DuplicateKeyPolicy, RetryConfig},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IssueBillInput {
    pub order_id: Uuid,
    /// Overrides the order's selling price when set.
    pub amount: Option<Decimal>,
    pub gst_amount: Option<Decimal>,
}

/// Billing against finished orders. Bill numbers are generated and unique;
/// a collision regenerates and retries.
#[derive(Clone)]
pub struct BillingService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
    retry_config: RetryConfig,
}

impl BillingService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db,
            event_sender,
            retry_config: RetryConfig::default(),
        }
    }

    fn generate_bill_number() -> String {
        let suffix: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        format!("BILL-{}", suffix)
    }

    #[instrument(skip(self, input), fields(order_id = %input.order_id))]
    pub async fn issue_bill(&self, input: IssueBillInput) -> Result<bill::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let order = OrderEntity::find_by_id(input.order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", input.order_id))
            })?;

        if order.status == "cancelled" {
            return Err(ServiceError::InvalidInput(
                "Cannot bill a cancelled order".to_string(),
            ));
        }

        let amount = input.amount.unwrap_or(order.selling_price);
        let gst_amount = input.gst_amount.unwrap_or(order.gst_amount);
        if amount < Decimal::ZERO || gst_amount < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Bill amounts cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let bill_id = Uuid::new_v4();
        let company_id = order.company_id;

        let insert_result = with_retry(&self.retry_config, DuplicateKeyPolicy, |_| {
            let active = bill::ActiveModel {
                id: Set(bill_id),
                bill_number: Set(Self::generate_bill_number()),
                order_id: Set(input.order_id),
                company_id: Set(company_id),
                amount: Set(amount),
                gst_amount: Set(gst_amount),
                total_amount: Set(amount + gst_amount),
                status: Set("issued".to_string()),
                billed_at: Set(now),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            let db = self.db.clone();
            async move { active.insert(&*db).await }
        })
        .await;

        let created = insert_result.map_err(|e| {
            if is_duplicate_key(&e) {
                ServiceError::Conflict(format!(
                    "Bill number collision persisted across {} attempts",
                    self.retry_config.max_attempts
                ))
            } else {
                error!(order_id = %input.order_id, error = %e, "bill insert failed");
                ServiceError::DatabaseError(e)
            }
        })?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::BillIssued(created.id)).await {
                warn!(bill_id = %created.id, error = %e, "failed to send bill event");
            }
        }

        info!(bill_id = %created.id, bill_number = %created.bill_number, "bill issued");
        Ok(created)
    }

    #[instrument(skip(self), fields(bill_id = %bill_id))]
    pub async fn mark_paid(&self, bill_id: Uuid) -> Result<bill::Model, ServiceError> {
        let bill = BillEntity::find_by_id(bill_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Bill {} not found", bill_id)))?;

        if bill.status == "paid" {
            return Err(ServiceError::InvalidInput(format!(
                "Bill {} is already paid",
                bill.bill_number
            )));
        }

        let mut active: bill::ActiveModel = bill.into();
        active.status = Set("paid".to_string());
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::BillPaid(bill_id)).await {
                warn!(bill_id = %bill_id, error = %e, "failed to send bill paid event");
            }
        }

        info!(bill_id = %bill_id, "bill marked paid");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_bill(&self, bill_id: Uuid) -> Result<Option<bill::Model>, ServiceError> {
        BillEntity::find_by_id(bill_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_bills(
        &self,
        company_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<bill::Model>, u64), ServiceError> {
        let mut query = BillEntity::find().order_by_desc(bill::Column::BilledAt);
        if let Some(company_id) = company_id {
            query = query.filter(bill::Column::CompanyId.eq(company_id));
        }

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let bills = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((bills, total))
    }
}
