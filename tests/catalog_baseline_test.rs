//! Baseline cost fetching: lookups degrade to defaults instead of blocking
//! order intake.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use bagworks_api::entities::{catalog_component, catalog_template};
use bagworks_api::services::catalog::BaselineCosts;
use bagworks_api::services::CatalogService;

fn template(id: Uuid) -> catalog_template::Model {
    catalog_template::Model {
        id,
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
    }
}

#[tokio::test]
async fn missing_template_falls_back_to_defaults() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<catalog_template::Model>::new()])
        .into_connection();

    let service = CatalogService::new(Arc::new(db));
    let baseline = service.fetch_baseline_costs(Uuid::new_v4()).await;

    assert_eq!(baseline, BaselineCosts::default());
    assert_eq!(baseline.margin, dec!(15));
}

#[tokio::test]
async fn existing_template_supplies_its_charges() {
    let template_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![template(template_id)]])
        .into_connection();

    let service = CatalogService::new(Arc::new(db));
    let baseline = service.fetch_baseline_costs(template_id).await;

    assert_eq!(baseline.cutting_charge, dec!(1));
    assert_eq!(baseline.transport_charge, dec!(50));
    assert_eq!(baseline.margin, dec!(20));
}

#[tokio::test]
async fn template_components_come_back_in_costing_form() {
    let template_id = Uuid::new_v4();
    let component = catalog_component::Model {
        id: Uuid::new_v4(),
        template_id,
        component_type: "part".to_string(),
        custom_name: None,
        length: Some(dec!(20)),
        width: Some(dec!(30)),
        roll_width: Some(dec!(40)),
        formula: "standard".to_string(),
        consumption: Some(dec!(300)),
        material_id: None,
        created_at: Utc::now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![component]])
        .into_connection();

    let service = CatalogService::new(Arc::new(db));
    let definitions = service
        .component_definitions(template_id)
        .await
        .expect("lookup succeeds");

    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].type_tag, "part");
    assert_eq!(definitions[0].consumption, Some(dec!(300)));
    assert!(!definitions[0].is_manual);
}
