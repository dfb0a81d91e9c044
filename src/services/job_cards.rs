use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::job_card::{self, Entity as JobCardEntity},
    entities::order::Entity as OrderEntity,
    errors::ServiceError,
    events::{Event, EventSender},
};

/// The three production stages an order moves through.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductionStage {
    Cutting,
    Printing,
    Stitching,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobCardStatus {
    Pending,
    InProgress,
    Completed,
    OnHold,
}

impl JobCardStatus {
    /// Forward-only transitions, plus hold/resume from either active state.
    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::OnHold)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::OnHold)
                | (Self::OnHold, Self::Pending)
                | (Self::OnHold, Self::InProgress)
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateJobCardInput {
    pub order_id: Uuid,
    pub stage: ProductionStage,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateJobCardStatusInput {
    pub status: JobCardStatus,
    #[validate(range(min = 0, message = "Completed quantity cannot be negative"))]
    pub quantity_completed: Option<i32>,
    pub notes: Option<String>,
}

/// Production tracking: one card per stage per order, with a guarded
/// status state machine.
#[derive(Clone)]
pub struct JobCardService {
    db: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl JobCardService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(order_id = %input.order_id, stage = %input.stage))]
    pub async fn create_job_card(
        &self,
        input: CreateJobCardInput,
    ) -> Result<job_card::Model, ServiceError> {
        OrderEntity::find_by_id(input.order_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", input.order_id))
            })?;

        let existing = JobCardEntity::find()
            .filter(job_card::Column::OrderId.eq(input.order_id))
            .filter(job_card::Column::Stage.eq(input.stage.to_string()))
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Order {} already has a {} job card",
                input.order_id, input.stage
            )));
        }

        let now = Utc::now();
        let active = job_card::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(input.order_id),
            stage: Set(input.stage.to_string()),
            status: Set(JobCardStatus::Pending.to_string()),
            assigned_to: Set(input.assigned_to),
            quantity_completed: Set(0),
            started_at: Set(None),
            completed_at: Set(None),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = active.insert(&*self.db).await.map_err(|e| {
            error!("Failed to create job card: {}", e);
            ServiceError::db_error(e)
        })?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender.send(Event::JobCardCreated(created.id)).await {
                warn!(job_card_id = %created.id, error = %e, "failed to send job card event");
            }
        }

        info!(job_card_id = %created.id, "job card created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(job_card_id = %job_card_id))]
    pub async fn update_status(
        &self,
        job_card_id: Uuid,
        input: UpdateJobCardStatusInput,
    ) -> Result<job_card::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let card = JobCardEntity::find_by_id(job_card_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Job card {} not found", job_card_id))
            })?;

        let current = JobCardStatus::from_str(&card.status).map_err(|_| {
            ServiceError::InternalError(format!(
                "Job card {} has unrecognized status {}",
                job_card_id, card.status
            ))
        })?;

        if !current.can_transition_to(input.status) {
            return Err(ServiceError::InvalidInput(format!(
                "Job card cannot move from {} to {}",
                current, input.status
            )));
        }

        let now = Utc::now();
        let old_status = card.status.clone();
        let stage = card.stage.clone();

        let mut active: job_card::ActiveModel = card.into();
        active.status = Set(input.status.to_string());
        if input.status == JobCardStatus::InProgress && current == JobCardStatus::Pending {
            active.started_at = Set(Some(now));
        }
        if input.status == JobCardStatus::Completed {
            active.completed_at = Set(Some(now));
        }
        if let Some(quantity) = input.quantity_completed {
            active.quantity_completed = Set(quantity);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Some(now));

        let updated = active.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            if let Err(e) = sender
                .send(Event::JobCardStatusChanged {
                    job_card_id,
                    stage,
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await
            {
                warn!(job_card_id = %job_card_id, error = %e, "failed to send status event");
            }
        }

        info!(job_card_id = %job_card_id, status = %updated.status, "job card status changed");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_job_card(
        &self,
        job_card_id: Uuid,
    ) -> Result<Option<job_card::Model>, ServiceError> {
        JobCardEntity::find_by_id(job_card_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn list_job_cards(
        &self,
        order_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<job_card::Model>, u64), ServiceError> {
        let mut query = JobCardEntity::find().order_by_desc(job_card::Column::CreatedAt);
        if let Some(order_id) = order_id {
            query = query.filter(job_card::Column::OrderId.eq(order_id));
        }

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let cards = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((cards, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions_are_forward_only() {
        assert!(JobCardStatus::Pending.can_transition_to(JobCardStatus::InProgress));
        assert!(JobCardStatus::InProgress.can_transition_to(JobCardStatus::Completed));
        assert!(!JobCardStatus::Completed.can_transition_to(JobCardStatus::Pending));
        assert!(!JobCardStatus::Completed.can_transition_to(JobCardStatus::InProgress));
        assert!(!JobCardStatus::Pending.can_transition_to(JobCardStatus::Completed));
    }

    #[test]
    fn hold_and_resume_round_trips() {
        assert!(JobCardStatus::InProgress.can_transition_to(JobCardStatus::OnHold));
        assert!(JobCardStatus::OnHold.can_transition_to(JobCardStatus::InProgress));
    }

    #[test]
    fn stage_tags_render_lowercase() {
        assert_eq!(ProductionStage::Cutting.to_string(), "cutting");
        assert_eq!(JobCardStatus::InProgress.to_string(), "in_progress");
    }
}
