pub mod bill;
pub mod catalog_component;
pub mod catalog_template;
pub mod company;
pub mod inventory_item;
pub mod job_card;
pub mod order;
pub mod order_component;
pub mod purchase;
pub mod vendor;
