use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    costing::{ComponentDefinition, ConsumptionFormula},
    db::DbPool,
    entities::catalog_component::{self, Entity as CatalogComponentEntity},
    entities::catalog_template::{self, Entity as CatalogTemplateEntity},
    errors::ServiceError,
};

/// Baseline per-unit charges read off a catalog template. Defaults kick in
/// whenever the template lookup fails: zero charges, 15 percent margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineCosts {
    pub material_cost: Decimal,
    pub cutting_charge: Decimal,
    pub printing_charge: Decimal,
    pub stitching_charge: Decimal,
    pub transport_charge: Decimal,
    pub margin: Decimal,
    pub selling_rate: Decimal,
}

impl Default for BaselineCosts {
    fn default() -> Self {
        Self {
            material_cost: Decimal::ZERO,
            cutting_charge: Decimal::ZERO,
            printing_charge: Decimal::ZERO,
            stitching_charge: Decimal::ZERO,
            transport_charge: Decimal::ZERO,
            margin: dec!(15),
            selling_rate: Decimal::ZERO,
        }
    }
}

impl From<&catalog_template::Model> for BaselineCosts {
    fn from(template: &catalog_template::Model) -> Self {
        Self {
            material_cost: template.material_cost,
            cutting_charge: template.cutting_charge,
            printing_charge: template.printing_charge,
            stitching_charge: template.stitching_charge,
            transport_charge: template.transport_charge,
            margin: template.margin,
            selling_rate: template.selling_rate,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TemplateComponentInput {
    pub component_type: String,
    pub custom_name: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub roll_width: Option<Decimal>,
    pub formula: Option<String>,
    pub consumption: Option<Decimal>,
    pub material_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTemplateInput {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,
    pub product_quantity: Option<i32>,
    pub material_cost: Option<Decimal>,
    pub cutting_charge: Option<Decimal>,
    pub printing_charge: Option<Decimal>,
    pub stitching_charge: Option<Decimal>,
    pub transport_charge: Option<Decimal>,
    pub margin: Option<Decimal>,
    pub selling_rate: Option<Decimal>,
    #[serde(default)]
    pub components: Vec<TemplateComponentInput>,
}

/// Catalog templates: reusable product definitions supplying default
/// components, charges and the product-quantity multiplier.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_template(
        &self,
        input: CreateTemplateInput,
    ) -> Result<catalog_template::Model, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db;
        let now = Utc::now();
        let template_id = Uuid::new_v4();

        let template = catalog_template::ActiveModel {
            id: Set(template_id),
            name: Set(input.name),
            product_quantity: Set(input.product_quantity.unwrap_or(1).max(1)),
            material_cost: Set(input.material_cost.unwrap_or(Decimal::ZERO)),
            cutting_charge: Set(input.cutting_charge.unwrap_or(Decimal::ZERO)),
            printing_charge: Set(input.printing_charge.unwrap_or(Decimal::ZERO)),
            stitching_charge: Set(input.stitching_charge.unwrap_or(Decimal::ZERO)),
            transport_charge: Set(input.transport_charge.unwrap_or(Decimal::ZERO)),
            margin: Set(input.margin.unwrap_or(dec!(15))),
            selling_rate: Set(input.selling_rate.unwrap_or(Decimal::ZERO)),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = template.insert(db).await.map_err(|e| {
            error!("Failed to create catalog template: {}", e);
            ServiceError::db_error(e)
        })?;

        if !input.components.is_empty() {
            let rows: Vec<catalog_component::ActiveModel> = input
                .components
                .into_iter()
                .map(|component| catalog_component::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    template_id: Set(template_id),
                    component_type: Set(component.component_type.trim().to_lowercase()),
                    custom_name: Set(component.custom_name),
                    length: Set(component.length),
                    width: Set(component.width),
                    roll_width: Set(component.roll_width),
                    formula: Set(ConsumptionFormula::parse_or_default(
                        component.formula.as_deref().unwrap_or(""),
                    )
                    .to_string()),
                    consumption: Set(component.consumption),
                    material_id: Set(component.material_id),
                    created_at: Set(now),
                })
                .collect();

            CatalogComponentEntity::insert_many(rows)
                .exec(db)
                .await
                .map_err(|e| {
                    error!(template_id = %template_id, "Failed to insert template components: {}", e);
                    ServiceError::db_error(e)
                })?;
        }

        info!(template_id = %template_id, "catalog template created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_template(
        &self,
        template_id: Uuid,
    ) -> Result<Option<(catalog_template::Model, Vec<catalog_component::Model>)>, ServiceError>
    {
        let db = &*self.db;

        let template = CatalogTemplateEntity::find_by_id(template_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        match template {
            Some(template) => {
                let components = CatalogComponentEntity::find()
                    .filter(catalog_component::Column::TemplateId.eq(template_id))
                    .order_by_asc(catalog_component::Column::CreatedAt)
                    .all(db)
                    .await
                    .map_err(ServiceError::db_error)?;
                Ok(Some((template, components)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_templates(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<catalog_template::Model>, u64), ServiceError> {
        let db = &*self.db;

        let paginator = CatalogTemplateEntity::find()
            .order_by_desc(catalog_template::Column::CreatedAt)
            .paginate(db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let templates = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::db_error)?;

        Ok((templates, total))
    }

    #[instrument(skip(self))]
    pub async fn delete_template(&self, template_id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db;

        let template = CatalogTemplateEntity::find_by_id(template_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Catalog template {} not found", template_id))
            })?;

        CatalogComponentEntity::delete_many()
            .filter(catalog_component::Column::TemplateId.eq(template_id))
            .exec(db)
            .await
            .map_err(ServiceError::db_error)?;

        template.delete(db).await.map_err(ServiceError::db_error)?;

        info!(template_id = %template_id, "catalog template deleted");
        Ok(())
    }

    /// Baseline charges for an order draft. Lookup trouble degrades to
    /// defaults with a warning; order creation is never blocked here.
    #[instrument(skip(self))]
    pub async fn fetch_baseline_costs(&self, template_id: Uuid) -> BaselineCosts {
        let db = &*self.db;

        match CatalogTemplateEntity::find_by_id(template_id).one(db).await {
            Ok(Some(template)) => BaselineCosts::from(&template),
            Ok(None) => {
                warn!(template_id = %template_id, "catalog template not found, using default charges");
                BaselineCosts::default()
            }
            Err(e) => {
                warn!(template_id = %template_id, error = %e, "catalog lookup failed, using default charges");
                BaselineCosts::default()
            }
        }
    }

    /// The template's component definitions in costing-engine form.
    #[instrument(skip(self))]
    pub async fn component_definitions(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<ComponentDefinition>, ServiceError> {
        let db = &*self.db;

        let rows = CatalogComponentEntity::find()
            .filter(catalog_component::Column::TemplateId.eq(template_id))
            .order_by_asc(catalog_component::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| ComponentDefinition {
                type_tag: row.component_type,
                custom_name: row.custom_name,
                length: row.length,
                width: row.width,
                roll_width: row.roll_width,
                formula: ConsumptionFormula::parse_or_default(&row.formula),
                consumption: row.consumption,
                material_id: row.material_id,
                is_manual: false,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_baseline_uses_fifteen_percent_margin() {
        let baseline = BaselineCosts::default();
        assert_eq!(baseline.margin, dec!(15));
        assert_eq!(baseline.cutting_charge, Decimal::ZERO);
        assert_eq!(baseline.transport_charge, Decimal::ZERO);
    }

    #[test]
    fn baseline_reads_template_fields() {
        let template = catalog_template::Model {
            id: Uuid::new_v4(),
            name: "carry bag 3-pack".to_string(),
            product_quantity: 3,
            material_cost: dec!(12),
            cutting_charge: dec!(1),
            printing_charge: dec!(2),
            stitching_charge: dec!(3),
            transport_charge: dec!(50),
            margin: dec!(20),
            selling_rate: dec!(25),
            created_at: Utc::now(),
            updated_at: None,
        };
        let baseline = BaselineCosts::from(&template);
        assert_eq!(baseline.margin, dec!(20));
        assert_eq!(baseline.stitching_charge, dec!(3));
    }
}
