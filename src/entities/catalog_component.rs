use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A component definition belonging to a catalog template. `consumption`,
/// when present, is the total at the template's own product quantity; the
/// builder divides it back down to a per-unit base.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_components")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub template_id: Uuid,
    pub component_type: String,
    pub custom_name: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: String,
    pub consumption: Option<Decimal>,
    pub material_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::catalog_template::Entity",
        from = "Column::TemplateId",
        to = "super::catalog_template::Column::Id"
    )]
    Template,
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::MaterialId",
        to = "super::inventory_item::Column::Id"
    )]
    Material,
}

impl Related<super::catalog_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
