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
use crate::services::companies::{CreateCompanyInput, UpdateCompanyInput};

async fn create_company(
    State(services): State<AppServices>,
    Json(input): Json<CreateCompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let company = services
        .companies
        .create_company(input)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(company))
}

async fn get_company(
    State(services): State<AppServices>,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let company = services
        .companies
        .get_company(company_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", company_id)))?;
    Ok(success_response(company))
}

async fn list_companies(
    State(services): State<AppServices>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, per_page) = pagination.normalized();
    let (companies, total) = services
        .companies
        .list_companies(page, per_page)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(Paginated {
        items: companies,
        total,
        page,
        per_page,
    }))
}

async fn update_company(
    State(services): State<AppServices>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<UpdateCompanyInput>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&input)?;
    let company = services
        .companies
        .update_company(company_id, input)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(company))
}

async fn delete_company(
    State(services): State<AppServices>,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .companies
        .delete_company(company_id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

pub fn routes() -> Router<AppServices> {
    Router::new()
        .route("/companies", post(create_company).get(list_companies))
        .route(
            "/companies/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}
