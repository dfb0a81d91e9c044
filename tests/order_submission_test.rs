//! Submission path tests over a mock database: baseline degradation,
//! batched material lookup, order creation and the kept-order-on-component-
//! failure contract.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use uuid::Uuid;

use bagworks_api::costing::TransportPolicy;
use bagworks_api::entities::{inventory_item, order, order_component};
use bagworks_api::errors::ServiceError;
use bagworks_api::events::{Event, EventSender};
use bagworks_api::services::orders::{ComponentInput, CreateOrderRequest};
use bagworks_api::services::{CatalogService, InventoryService, OrderService};

fn order_service(db: sea_orm::DatabaseConnection) -> OrderService {
    order_service_with_events(db, None)
}

fn order_service_with_events(
    db: sea_orm::DatabaseConnection,
    event_sender: Option<Arc<EventSender>>,
) -> OrderService {
    let db = Arc::new(db);
    let catalog = Arc::new(CatalogService::new(db.clone()));
    let inventory = Arc::new(InventoryService::new(db.clone(), None));
    OrderService::new(
        db,
        catalog,
        inventory,
        event_sender,
        "ORD".to_string(),
        TransportPolicy::FlatPerOrder,
    )
}

fn manual_handle_request(company_id: Uuid) -> CreateOrderRequest {
    CreateOrderRequest {
        company_id,
        order_number: Some("ORD-777001".to_string()),
        quantity: 4,
        product_quantity: Some(3),
        bag_length: None,
        bag_width: None,
        catalog_template_id: None,
        components: vec![ComponentInput {
            component_type: "handle".to_string(),
            custom_name: None,
            length: None,
            width: None,
            roll_width: None,
            formula: None,
            consumption: Some(dec!(600)),
            material_id: None,
            is_manual: true,
        }],
        gst_amount: None,
        margin_percent: None,
        transport_policy: None,
        notes: None,
    }
}

fn persisted_order(id: Uuid, company_id: Uuid) -> order::Model {
    let now = Utc::now();
    order::Model {
        id,
        order_number: "ORD-777001".to_string(),
        company_id,
        status: "pending".to_string(),
        quantity: 4,
        product_quantity: 3,
        total_quantity: 12,
        bag_length: None,
        bag_width: None,
        catalog_template_id: None,
        material_cost: dec!(0),
        cutting_charge: dec!(0),
        printing_charge: dec!(0),
        stitching_charge: dec!(0),
        transport_charge: dec!(0),
        gst_amount: dec!(0),
        margin_percent: dec!(15),
        total_cost: dec!(0),
        per_unit_cost: dec!(0),
        selling_price: dec!(0),
        notes: None,
        created_at: now,
        updated_at: Some(now),
        version: 1,
    }
}

fn persisted_handle_component(order_id: Uuid) -> order_component::Model {
    order_component::Model {
        id: Uuid::new_v4(),
        order_id,
        component_type: "handle".to_string(),
        custom_name: None,
        length: None,
        width: None,
        roll_width: None,
        formula: "standard".to_string(),
        material_id: None,
        base_consumption: None,
        consumption: Some(dec!(600)),
        is_manual: true,
        material_cost: dec!(0),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_order_persists_header_then_components() {
    let order_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![persisted_order(order_id, company_id)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![persisted_handle_component(order_id)]])
        .into_connection();

    let service = order_service(db);
    let response = service
        .create_order(manual_handle_request(company_id))
        .await
        .expect("create_order should succeed");

    assert_eq!(response.order_number, "ORD-777001");
    assert_eq!(response.total_quantity, 12);
    assert_eq!(response.components.len(), 1);
    assert_eq!(response.components[0].consumption, Some(dec!(600)));
    assert!(response.components[0].is_manual);
}

#[tokio::test]
async fn component_failure_keeps_order_and_preserves_payloads() {
    let order_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![persisted_order(order_id, company_id)]])
        .append_exec_errors([DbErr::Custom("component insert rejected".to_string())])
        .into_connection();

    let service = order_service(db);
    let error = service
        .create_order(manual_handle_request(company_id))
        .await
        .expect_err("component insert should fail");

    assert_matches!(
        &error,
        ServiceError::ComponentPersistFailed { components, .. } if components.len() == 1
    );
    if let ServiceError::ComponentPersistFailed { components, .. } = &error {
        assert_eq!(components[0]["component_type"], "handle");
        assert_eq!(components[0]["is_manual"], true);
    }
}

#[tokio::test]
async fn component_failure_emits_an_event() {
    let order_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![persisted_order(order_id, company_id)]])
        .append_exec_errors([DbErr::Custom("component insert rejected".to_string())])
        .into_connection();

    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let service = order_service_with_events(db, Some(Arc::new(EventSender::new(tx))));

    let error = service
        .create_order(manual_handle_request(company_id))
        .await
        .expect_err("component insert should fail");
    let failed_order_id = match &error {
        ServiceError::ComponentPersistFailed { order_id, .. } => *order_id,
        other => panic!("unexpected error: {other}"),
    };

    let event = rx.recv().await.expect("an event was sent");
    assert_matches!(
        event,
        Event::OrderComponentsFailed { order_id, component_count: 1 }
            if order_id == failed_order_id
    );
}

#[tokio::test]
async fn order_costs_report_persisted_figures_verbatim() {
    let order_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut stored = persisted_order(order_id, company_id);
    stored.material_cost = dec!(3000);
    stored.cutting_charge = dec!(4);
    stored.total_cost = dec!(3004);
    stored.per_unit_cost = dec!(751);
    stored.selling_price = dec!(3454.6);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();

    let service = order_service(db);
    let costs = service.order_costs(order_id).await.expect("order exists");

    assert_eq!(costs.material_cost, dec!(3000));
    assert_eq!(costs.total_cost, dec!(3004));
    assert_eq!(costs.per_unit_cost, dec!(751));
    assert_eq!(costs.selling_price, dec!(3454.6));
}

#[tokio::test]
async fn missing_order_costs_are_a_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<order::Model>::new()])
        .into_connection();

    let service = order_service(db);
    let error = service.order_costs(Uuid::new_v4()).await.expect_err("no order");
    assert_matches!(error, ServiceError::NotFound(_));
}

#[tokio::test]
async fn preview_does_not_touch_the_database_for_manual_components() {
    // No mock results appended: any query would error the test.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let service = order_service(db);
    let preview = service
        .preview_costs(manual_handle_request(Uuid::new_v4()))
        .await
        .expect("preview should not persist anything");

    assert_eq!(preview.total_quantity, 12);
    assert_eq!(preview.components.len(), 1);
    assert_eq!(preview.components[0].total_consumption, Some(dec!(600)));
}

#[tokio::test]
async fn batched_material_lookup_returns_every_row() {
    let now = Utc::now();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let rows = vec![
        inventory_item::Model {
            id: a,
            name: "non-woven 90gsm".to_string(),
            color: Some("white".to_string()),
            gsm: Some(90),
            unit: "yard".to_string(),
            purchase_rate: dec!(2.5),
            roll_width: Some(dec!(40)),
            quantity_in_stock: dec!(1000),
            vendor_id: None,
            created_at: now,
            updated_at: None,
        },
        inventory_item::Model {
            id: b,
            name: "zip chain no.5".to_string(),
            color: None,
            gsm: None,
            unit: "piece".to_string(),
            purchase_rate: dec!(12),
            roll_width: None,
            quantity_in_stock: dec!(400),
            vendor_id: None,
            created_at: now,
            updated_at: None,
        },
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();

    let inventory = InventoryService::new(Arc::new(db), None);
    let materials = inventory
        .material_attributes(&[a, b])
        .await
        .expect("lookup succeeds");

    assert_eq!(materials.len(), 2);
    assert_eq!(materials[&a].purchase_rate, dec!(2.5));
    assert_eq!(materials[&a].roll_width, Some(dec!(40)));
    assert_eq!(materials[&b].purchase_rate, dec!(12));
}

#[tokio::test]
async fn empty_material_id_list_skips_the_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let inventory = InventoryService::new(Arc::new(db), None);

    let materials = inventory.material_attributes(&[]).await.expect("no query runs");
    assert!(materials.is_empty());
}
