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
    created_response, map_service_error, success_response, validate_input, PaginationParams,
};
use crate::handlers::AppServices;
use crate::services::orders::CreateOrderRequest;

#[derive(Debug, Deserialize)]
struct CancelOrderBody {
    reason: Option<String>,
}

async fn create_order(
    State(services): State<AppServices>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&request)?;
    let order = services
        .orders
        .create_order(request)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(order))
}

async fn get_order(
    State(services): State<AppServices>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = services
        .orders
        .get_order(order_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Order {} not found", order_id)))?;
    Ok(success_response(order))
}

async fn list_orders(
    State(services): State<AppServices>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let list = services
        .orders
        .list_orders(page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(list))
}

async fn update_order(
    State(services): State<AppServices>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&request)?;
    let order = services
        .orders
        .update_order(order_id, request)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(order))
}

async fn cancel_order(
    State(services): State<AppServices>,
    Path(order_id): Path<Uuid>,
    Json(body): Json<CancelOrderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let order = services
        .orders
        .cancel_order(order_id, body.reason)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(order))
}

/// Persisted cost figures, reported verbatim.
async fn order_costs(
    State(services): State<AppServices>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let costs = services
        .orders
        .order_costs(order_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(costs))
}

/// Prices a draft without persisting anything.
async fn preview_costs(
    State(services): State<AppServices>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&request)?;
    let preview = services
        .orders
        .preview_costs(request)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(preview))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/preview", post(preview_costs))
        .route("/orders/:id", get(get_order).put(update_order))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/orders/:id/costs", get(order_costs))
}
