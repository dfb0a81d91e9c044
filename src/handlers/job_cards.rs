use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, success_response, validate_input, Paginated,
    PaginationParams,
};
use crate::handlers::AppServices;
use crate::services::job_cards::{CreateJobCardInput, UpdateJobCardStatusInput};

#[derive(Debug, Deserialize)]
struct JobCardFilter {
    order_id: Option<Uuid>,
}

async fn create_job_card(
    State(services): State<AppServices>,
    Json(input): Json<CreateJobCardInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let card = services
        .job_cards
        .create_job_card(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(card))
}

async fn get_job_card(
    State(services): State<AppServices>,
    Path(job_card_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let card = services
        .job_cards
        .get_job_card(job_card_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Job card {} not found", job_card_id)))?;
    Ok(success_response(card))
}

async fn list_job_cards(
    State(services): State<AppServices>,
    Query(filter): Query<JobCardFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (cards, total) = services
        .job_cards
        .list_job_cards(filter.order_id, page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: cards,
        total,
        page,
        per_page,
    }))
}

async fn update_status(
    State(services): State<AppServices>,
    Path(job_card_id): Path<Uuid>,
    Json(input): Json<UpdateJobCardStatusInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let card = services
        .job_cards
        .update_status(job_card_id, input)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(card))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/job-cards", post(create_job_card).get(list_job_cards))
        .route("/job-cards/:id", get(get_job_card))
        .route("/job-cards/:id/status", put(update_status))
}
