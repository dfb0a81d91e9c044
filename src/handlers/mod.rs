//! HTTP boundary: one router per resource, thin handlers that validate,
//! call a service and translate errors.

pub mod billing;
pub mod catalog;
pub mod common;
pub mod companies;
pub mod health;
pub mod inventory;
pub mod job_cards;
pub mod orders;
pub mod purchases;
pub mod vendors;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::DbPool,
    events::EventSender,
    services::{
        BillingService, CatalogService, CompanyService, InventoryService, JobCardService,
        OrderService, PurchaseService, VendorService,
    },
};

/// All services, wired once at startup and cloned into routers.
#[derive(Clone)]
pub struct AppServices {
    pub db: Arc<DbPool>,
    pub catalog: Arc<CatalogService>,
    pub inventory: Arc<InventoryService>,
    pub orders: Arc<OrderService>,
    pub purchases: Arc<PurchaseService>,
    pub job_cards: Arc<JobCardService>,
    pub vendors: Arc<VendorService>,
    pub companies: Arc<CompanyService>,
    pub billing: Arc<BillingService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, config: &AppConfig, event_sender: Option<Arc<EventSender>>) -> Self {
        let catalog = Arc::new(CatalogService::new(db.clone()));
        let inventory = Arc::new(InventoryService::new(db.clone(), event_sender.clone()));
        let orders = Arc::new(OrderService::new(
            db.clone(),
            catalog.clone(),
            inventory.clone(),
            event_sender.clone(),
            config.order_number_prefix.clone(),
            config.transport_policy,
        ));
        let purchases = Arc::new(PurchaseService::new(
            db.clone(),
            inventory.clone(),
            event_sender.clone(),
        ));
        let job_cards = Arc::new(JobCardService::new(db.clone(), event_sender.clone()));
        let vendors = Arc::new(VendorService::new(db.clone()));
        let companies = Arc::new(CompanyService::new(db.clone()));
        let billing = Arc::new(BillingService::new(db.clone(), event_sender));

        Self {
            db,
            catalog,
            inventory,
            orders,
            purchases,
            job_cards,
            vendors,
            companies,
            billing,
        }
    }
}
