use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
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
use crate::services::billing::IssueBillInput;

#[derive(Debug, Deserialize)]
struct BillFilter {
    company_id: Option<Uuid>,
}

async fn issue_bill(
    State(services): State<AppServices>,
    Json(input): Json<IssueBillInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let bill = services
        .billing
        .issue_bill(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(bill))
}

async fn get_bill(
    State(services): State<AppServices>,
    Path(bill_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bill = services
        .billing
        .get_bill(bill_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Bill {} not found", bill_id)))?;
    Ok(success_response(bill))
}

async fn list_bills(
    State(services): State<AppServices>,
    Query(filter): Query<BillFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (bills, total) = services
        .billing
        .list_bills(filter.company_id, page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: bills,
        total,
        page,
        per_page,
    }))
}

async fn mark_paid(
    State(services): State<AppServices>,
    Path(bill_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bill = services
        .billing
        .mark_paid(bill_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(bill))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/bills", post(issue_bill).get(list_bills))
        .route("/bills/:id", get(get_bill))
        .route("/bills/:id/pay", post(mark_paid))
}
