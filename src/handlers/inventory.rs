use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    Paginated, PaginationParams,
};
use crate::handlers::AppServices;
use crate::services::inventory::{CreateMaterialInput, UpdateMaterialInput};

#[derive(Debug, Deserialize)]
struct AdjustStockBody {
    delta: Decimal,
    reason: Option<String>,
}

async fn create_material(
    State(services): State<AppServices>,
    Json(input): Json<CreateMaterialInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let material = services
        .inventory
        .create_material(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(material))
}

async fn get_material(
    State(services): State<AppServices>,
    Path(material_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let material = services
        .inventory
        .get_material(material_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Material {} not found", material_id)))?;
    Ok(success_response(material))
}

async fn list_materials(
    State(services): State<AppServices>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (materials, total) = services
        .inventory
        .list_materials(page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: materials,
        total,
        page,
        per_page,
    }))
}

async fn update_material(
    State(services): State<AppServices>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let material = services
        .inventory
        .update_material(material_id, input)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(material))
}

async fn delete_material(
    State(services): State<AppServices>,
    Path(material_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .inventory
        .delete_material(material_id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

async fn adjust_stock(
    State(services): State<AppServices>,
    Path(material_id): Path<Uuid>,
    Json(body): Json<AdjustStockBody>,
) -> Result<impl IntoResponse, ApiError> {
    let reason = body.reason.unwrap_or_else(|| "manual adjustment".to_string());
    let material = services
        .inventory
        .adjust_stock(material_id, body.delta, &reason)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(material))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/materials", post(create_material).get(list_materials))
        .route(
            "/materials/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
        .route("/materials/:id/adjust-stock", post(adjust_stock))
}
