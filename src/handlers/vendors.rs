use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    Paginated, PaginationParams,
};
use crate::handlers::AppServices;
use crate::services::vendors::{CreateVendorInput, UpdateVendorInput};

async fn create_vendor(
    State(services): State<AppServices>,
    Json(input): Json<CreateVendorInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let vendor = services
        .vendors
        .create_vendor(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(vendor))
}

async fn get_vendor(
    State(services): State<AppServices>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = services
        .vendors
        .get_vendor(vendor_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Vendor {} not found", vendor_id)))?;
    Ok(success_response(vendor))
}

async fn list_vendors(
    State(services): State<AppServices>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (vendors, total) = services
        .vendors
        .list_vendors(page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: vendors,
        total,
        page,
        per_page,
    }))
}

async fn update_vendor(
    State(services): State<AppServices>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<UpdateVendorInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let vendor = services
        .vendors
        .update_vendor(vendor_id, input)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(vendor))
}

async fn delete_vendor(
    State(services): State<AppServices>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .vendors
        .delete_vendor(vendor_id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/vendors", post(create_vendor).get(list_vendors))
        .route(
            "/vendors/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
}
