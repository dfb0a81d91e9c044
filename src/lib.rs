//! Backend for a bag manufacturing business: order intake with BOM-driven
//! cost calculation, raw-material inventory, production job cards, vendor
//! purchases and billing.

pub mod config;
pub mod costing;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod retry;
pub mod services;

use axum::Router;

use crate::handlers::AppServices;

/// Builds the versioned API router over the wired services.
pub fn api_v1_routes(services: AppServices) -> Router {
    let api = Router::new()
        .merge(handlers::health::routes())
        .merge(handlers::orders::routes())
        .merge(handlers::catalog::routes())
        .merge(handlers::inventory::routes())
        .merge(handlers::purchases::routes())
        .merge(handlers::job_cards::routes())
        .merge(handlers::vendors::routes())
        .merge(handlers::companies::routes())
        .merge(handlers::billing::routes())
        .with_state(services);

    Router::new().nest("/api/v1", api)
}
