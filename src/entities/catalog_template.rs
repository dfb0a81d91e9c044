use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A reusable product definition: baseline per-unit charges plus the
/// product-quantity multiplier (physical units yielded per order-quantity
/// unit, e.g. 3 bags per pack).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "catalog_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Template name is required"))]
    pub name: String,

    pub product_quantity: i32,
    pub material_cost: Decimal,
    pub cutting_charge: Decimal,
    pub printing_charge: Decimal,
    pub stitching_charge: Decimal,
    pub transport_charge: Decimal,
    pub margin: Decimal,
    pub selling_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::catalog_component::Entity")]
    CatalogComponents,
}

impl Related<super::catalog_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogComponents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
