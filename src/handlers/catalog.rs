use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{catalog_component, catalog_template};
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    Paginated, PaginationParams,
};
use crate::handlers::AppServices;
use crate::services::catalog::CreateTemplateInput;

#[derive(Debug, Serialize)]
struct TemplateDetail {
    #[serde(flatten)]
    template: catalog_template::Model,
    components: Vec<catalog_component::Model>,
}

async fn create_template(
    State(services): State<AppServices>,
    Json(input): Json<CreateTemplateInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let template = services
        .catalog
        .create_template(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(template))
}

async fn get_template(
    State(services): State<AppServices>,
    Path(template_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (template, components) = services
        .catalog
        .get_template(template_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Catalog template {} not found", template_id))
        })?;
    Ok(success_response(TemplateDetail {
        template,
        components,
    }))
}

async fn list_templates(
    State(services): State<AppServices>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (templates, total) = services
        .catalog
        .list_templates(page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: templates,
        total,
        page,
        per_page,
    }))
}

async fn delete_template(
    State(services): State<AppServices>,
    Path(template_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .catalog
        .delete_template(template_id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

/// Baseline charges for costing, degrading to defaults when the template
/// is missing.
async fn template_costs(
    State(services): State<AppServices>,
    Path(template_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let baseline = services.catalog.fetch_baseline_costs(template_id).await;
    Ok(success_response(baseline))
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/catalog", post(create_template).get(list_templates))
        .route("/catalog/:id", get(get_template).delete(delete_template))
        .route("/catalog/:id/costs", get(template_costs))
}
