//! Service layer: persistence, events and orchestration around the pure
//! costing engine.

pub mod billing;
pub mod catalog;
pub mod companies;
pub mod inventory;
pub mod job_cards;
pub mod orders;
pub mod purchases;
pub mod vendors;

pub use billing::BillingService;
pub use catalog::CatalogService;
pub use companies::CompanyService;
pub use inventory::InventoryService;
pub use job_cards::JobCardService;
pub use orders::OrderService;
pub use purchases::PurchaseService;
pub use vendors::VendorService;
