use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An order header. Cost aggregates are recomputed and rewritten on every
/// full re-save, never patched incrementally. `total_quantity` is always
/// `quantity * product_quantity`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(
        min = 1,
        max = 50,
        message = "Order number must be between 1 and 50 characters"
    ))]
    #[sea_orm(unique)]
    pub order_number: String,

    pub company_id: Uuid,
    pub status: String,
    pub quantity: i32,
    pub product_quantity: i32,
    pub total_quantity: i32,
    pub bag_length: Option<Decimal>,
    pub bag_width: Option<Decimal>,
    pub catalog_template_id: Option<Uuid>,
    pub material_cost: Decimal,
    pub cutting_charge: Decimal,
    pub printing_charge: Decimal,
    pub stitching_charge: Decimal,
    pub transport_charge: Decimal,
    pub gst_amount: Decimal,
    pub margin_percent: Decimal,
    pub total_cost: Decimal,
    pub per_unit_cost: Decimal,
    pub selling_price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_component::Entity")]
    OrderComponents,
    #[sea_orm(has_many = "super::job_card::Entity")]
    JobCards,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::order_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderComponents.def()
    }
}

impl Related<super::job_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCards.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
