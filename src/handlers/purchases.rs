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
use crate::services::purchases::RecordPurchaseInput;

#[derive(Debug, Deserialize)]
struct PurchaseFilter {
    vendor_id: Option<Uuid>,
}

async fn record_purchase(
    State(services): State<AppServices>,
    Json(input): Json<RecordPurchaseInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let purchase = services
        .purchases
        .record_purchase(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(purchase))
}

async fn get_purchase(
    State(services): State<AppServices>,
    Path(purchase_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = services
        .purchases
        .get_purchase(purchase_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase {} not found", purchase_id)))?;
    Ok(success_response(purchase))
}

async fn list_purchases(
    State(services): State<AppServices>,
    Query(filter): Query<PurchaseFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (purchases, total) = services
        .purchases
        .list_purchases(filter.vendor_id, page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: purchases,
        total,
        page,
        per_page,
    }))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/purchases", post(record_purchase).get(list_purchases))
        .route("/purchases/:id", get(get_purchase))
}
