// tests/movement_tests.rs

mod common;

use common::{seed_component, test_app};
use estoque_backend::common::error::AppError;
use estoque_backend::db::MovementRepository;
use estoque_backend::models::movement::{
    FulfillmentStatus, MovementRequest, MovementType,
};
use uuid::Uuid;

fn request(component_id: Uuid, movement_type: MovementType, quantity: i32) -> MovementRequest {
    MovementRequest {
        component_id,
        movement_type,
        quantity,
    }
}

#[tokio::test]
async fn entrada_then_saida_round_trips_stock() {
    let app = test_app();
    let component = seed_component(&app, "Resistor 10k", 20, 0).await;
    let user = Uuid::new_v4();

    app.movements
        .apply(&request(component.id, MovementType::Entrada, 7), user)
        .await
        .unwrap();
    app.movements
        .apply(&request(component.id, MovementType::Saida, 7), user)
        .await
        .unwrap();

    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 20);
}

#[tokio::test]
async fn entrada_updates_stock_and_appends_ledger() {
    let app = test_app();
    let component = seed_component(&app, "Capacitor 100nF", 5, 0).await;
    let user = Uuid::new_v4();

    let movement = app
        .movements
        .apply(&request(component.id, MovementType::Entrada, 10), user)
        .await
        .unwrap();

    assert_eq!(movement.quantity_changed, 10);
    assert_eq!(movement.performed_by, user);

    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 15);
    assert!(after.last_entry_at.is_some());
    assert!(after.last_exit_at.is_none());

    let history = app.movements.history(component.id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn saida_records_negative_quantity_changed() {
    let app = test_app();
    let component = seed_component(&app, "LED Vermelho", 8, 0).await;

    let movement = app
        .movements
        .apply(&request(component.id, MovementType::Saida, 3), Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(movement.quantity_changed, -3);
    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 5);
    assert!(after.last_exit_at.is_some());
}

#[tokio::test]
async fn strict_saida_overdraw_fails_without_side_effects() {
    let app = test_app();
    let component = seed_component(&app, "Diodo 1N4148", 4, 0).await;

    let result = app
        .movements
        .apply(&request(component.id, MovementType::Saida, 10), Uuid::new_v4())
        .await;

    match result {
        Err(AppError::InsufficientStock {
            available,
            requested,
        }) => {
            assert_eq!(available, 4);
            assert_eq!(requested, 10);
        }
        other => panic!("esperava InsufficientStock, veio {:?}", other.map(|m| m.id)),
    }

    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 4);
    assert!(app.movements.history(component.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_quantity_is_rejected_before_any_write() {
    let app = test_app();
    let component = seed_component(&app, "Cristal 16MHz", 4, 0).await;

    let result = app
        .movements
        .apply(&request(component.id, MovementType::Entrada, 0), Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(AppError::InvalidQuantity)));

    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 4);
}

#[tokio::test]
async fn unknown_component_is_not_found() {
    let app = test_app();
    let result = app
        .movements
        .apply(
            &request(Uuid::new_v4(), MovementType::Entrada, 1),
            Uuid::new_v4(),
        )
        .await;
    assert!(matches!(result, Err(AppError::ComponentNotFound)));
}

#[tokio::test]
async fn bulk_applies_valid_items_and_collects_errors() {
    let app = test_app();
    let a = seed_component(&app, "Trimpot 10k", 10, 0).await;
    let b = seed_component(&app, "Fusível 1A", 10, 0).await;
    let c = seed_component(&app, "Jumper", 10, 0).await;
    let user = Uuid::new_v4();

    let requests = vec![
        request(a.id, MovementType::Entrada, 5),
        request(b.id, MovementType::Saida, 999), // saldo insuficiente
        request(c.id, MovementType::Saida, 2),
    ];
    let result = app.movements.apply_bulk(&requests, user).await.unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.items.len(), 3);
    assert!(result.items[0].movement_id.is_some());
    assert!(result.items[1].error.is_some());
    assert!(result.items[2].movement_id.is_some());

    // Item 1 e 3 aplicados; o erro do item 2 não desfez nada.
    assert_eq!(app.components.get(a.id).await.unwrap().quantity_in_stock, 15);
    assert_eq!(app.components.get(b.id).await.unwrap().quantity_in_stock, 10);
    assert_eq!(app.components.get(c.id).await.unwrap().quantity_in_stock, 8);
}

#[tokio::test]
async fn partial_saida_processes_up_to_available() {
    let app = test_app();
    let component = seed_component(&app, "Transistor BC548", 4, 0).await;

    let results = app
        .movements
        .apply_partial(
            &[request(component.id, MovementType::Saida, 10)],
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let item = &results[0];
    assert_eq!(item.status, FulfillmentStatus::Partial);
    assert_eq!(item.requested, 10);
    assert_eq!(item.processed, 4);
    assert_eq!(item.available, 4);

    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 0);
}

#[tokio::test]
async fn partial_mode_statuses() {
    let app = test_app();
    let full = seed_component(&app, "Soquete DIP8", 10, 0).await;
    let empty = seed_component(&app, "Barra de Pinos", 0, 0).await;
    let user = Uuid::new_v4();

    let results = app
        .movements
        .apply_partial(
            &[
                request(full.id, MovementType::Saida, 3),
                request(empty.id, MovementType::Saida, 5),
                request(Uuid::new_v4(), MovementType::Saida, 1),
            ],
            user,
        )
        .await
        .unwrap();

    assert_eq!(results[0].status, FulfillmentStatus::Full);
    assert_eq!(results[0].processed, 3);

    assert_eq!(results[1].status, FulfillmentStatus::Unavailable);
    assert_eq!(results[1].processed, 0);
    assert_eq!(results[1].available, 0);

    assert_eq!(results[2].status, FulfillmentStatus::Unavailable);
    assert_eq!(results[2].available, 0);
}

#[tokio::test]
async fn partial_entrada_is_always_full() {
    let app = test_app();
    let component = seed_component(&app, "Regulador 7805", 0, 0).await;

    let results = app
        .movements
        .apply_partial(
            &[request(component.id, MovementType::Entrada, 50)],
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    assert_eq!(results[0].status, FulfillmentStatus::Full);
    assert_eq!(results[0].processed, 50);
    assert_eq!(
        app.components.get(component.id).await.unwrap().quantity_in_stock,
        50
    );
}

#[tokio::test]
async fn ledger_is_append_only_across_modes() {
    let app = test_app();
    let component = seed_component(&app, "Indutor 10uH", 10, 0).await;
    let user = Uuid::new_v4();

    app.movements
        .apply(&request(component.id, MovementType::Entrada, 5), user)
        .await
        .unwrap();
    app.movements
        .apply_partial(&[request(component.id, MovementType::Saida, 100)], user)
        .await
        .unwrap();

    let all = MovementRepository::list(&app.store).await.unwrap();
    assert_eq!(all.len(), 2);
    // Entrada de 5 e saída parcial de 15 (tudo que havia).
    let total: i32 = all.iter().map(|m| m.quantity_changed).sum();
    assert_eq!(total, 5 - 15);
}
