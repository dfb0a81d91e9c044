use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db;
use crate::handlers::AppServices;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    database: &'static str,
}

async fn health(State(services): State<AppServices>) -> Json<HealthStatus> {
    let database = match db::check_connection(&services.db).await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(HealthStatus {
        status: if database == "up" { "ok" } else { "degraded" },
        database,
    })
}

pub fn routes() -> Router<AppServices> {
    Router::new().route("/health", get(health))
}
