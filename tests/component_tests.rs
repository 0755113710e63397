// tests/component_tests.rs

mod common;

use common::{component_payload, seed_component, test_app};
use estoque_backend::common::error::AppError;
use estoque_backend::models::component::{CreateComponentPayload, UpdateComponentPayload};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_initializes_stock_and_audit_fields() {
    let app = test_app();
    let component = seed_component(&app, "Resistor 4k7", 30, 5).await;

    assert_eq!(component.quantity_in_stock, 30);
    assert_eq!(component.minimum_quantity, 5);
    assert!(component.last_entry_at.is_none());
    assert!(component.last_exit_at.is_none());
}

#[tokio::test]
async fn payload_accepts_flattened_camel_case_json() {
    let app = test_app();

    // O payload de criação embute os campos compartilhados achatados
    // no mesmo objeto JSON.
    let payload: CreateComponentPayload = serde_json::from_value(json!({
        "name": "Capacitor 470uF",
        "groupName": "Capacitores",
        "deviceName": "Eletrolítico",
        "valueName": "470uF",
        "packageName": "Radial",
        "minimumQuantity": 10,
        "price": 1.25,
        "drawer": "B2",
        "division": "3",
        "initialQuantity": 40
    }))
    .unwrap();

    let component = app.components.create(payload).await.unwrap();
    assert_eq!(component.group_name.as_deref(), Some("Capacitores"));
    assert_eq!(component.quantity_in_stock, 40);
    assert_eq!(component.minimum_quantity, 10);
    assert_eq!(component.price, Some(Decimal::new(125, 2)));
    assert_eq!(component.drawer.as_deref(), Some("B2"));
}

#[tokio::test]
async fn empty_name_fails_validation() {
    let app = test_app();
    let result = app.components.create(component_payload("", 0, 0)).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn update_changes_fields_but_not_stock() {
    let app = test_app();
    let component = seed_component(&app, "Resistor 1M", 12, 2).await;

    let payload: UpdateComponentPayload = serde_json::from_value(json!({
        "name": "Resistor 1M 1%",
        "minimumQuantity": 4,
        "drawer": "A1"
    }))
    .unwrap();

    let updated = app.components.update(component.id, payload).await.unwrap();
    assert_eq!(updated.name, "Resistor 1M 1%");
    assert_eq!(updated.minimum_quantity, 4);
    // O saldo só muda por movimentação.
    assert_eq!(updated.quantity_in_stock, 12);
}

#[tokio::test]
async fn update_unknown_component_is_not_found() {
    let app = test_app();
    let payload: UpdateComponentPayload =
        serde_json::from_value(json!({ "name": "Qualquer" })).unwrap();

    let result = app.components.update(Uuid::new_v4(), payload).await;
    assert!(matches!(result, Err(AppError::ComponentNotFound)));
}

#[tokio::test]
async fn delete_unknown_component_is_not_found() {
    let app = test_app();
    let result = app.components.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::ComponentNotFound)));
}

#[tokio::test]
async fn search_by_name_is_case_insensitive() {
    let app = test_app();
    seed_component(&app, "Resistor 10k", 1, 0).await;
    seed_component(&app, "resistor 22k", 1, 0).await;
    seed_component(&app, "Capacitor 1uF", 1, 0).await;

    let found = app.components.search_by_name("RESISTOR").await.unwrap();
    assert_eq!(found.len(), 2);

    let none = app.components.search_by_name("indutor").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let app = test_app();
    seed_component(&app, "Zener 5V1", 1, 0).await;
    seed_component(&app, "Ceramico 22pF", 1, 0).await;

    let all = app.components.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Ceramico 22pF");
}
