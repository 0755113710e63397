// tests/alert_tests.rs

mod common;

use common::{seed_component, test_app};
use estoque_backend::db::AlertRepository;
use estoque_backend::models::movement::{MovementRequest, MovementType};
use uuid::Uuid;

#[tokio::test]
async fn reconcile_creates_alert_iff_below_threshold() {
    let app = test_app();
    let low = seed_component(&app, "Resistor 1k", 5, 10).await;
    let ok = seed_component(&app, "Resistor 2k2", 50, 10).await;

    app.alerts.reconcile_one(low.id).await.unwrap();
    app.alerts.reconcile_one(ok.id).await.unwrap();

    let alerts = app.alerts.list().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].component_id, low.id);
    assert!(alerts[0].message.contains("Resistor 1k"));
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let app = test_app();
    let component = seed_component(&app, "Capacitor 10uF", 2, 10).await;

    app.alerts.reconcile_one(component.id).await.unwrap();
    let first = app.alerts.list().await.unwrap();

    app.alerts.reconcile_one(component.id).await.unwrap();
    let second = app.alerts.list().await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    // Mesma identidade: a segunda passada não recriou o alerta.
    assert_eq!(first[0].id, second[0].id);
}

#[tokio::test]
async fn boundary_equal_to_minimum_counts_as_low() {
    let app = test_app();
    let component = seed_component(&app, "Potenciômetro", 10, 10).await;

    app.alerts.reconcile_one(component.id).await.unwrap();

    assert_eq!(app.alerts.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn entrada_above_minimum_removes_alert() {
    // Cenário do caderno de testes: qty=5/min=10 cria o alerta;
    // Entrada(10) leva a 15 e a reconciliação o remove.
    let app = test_app();
    let component = seed_component(&app, "Relé 5V", 5, 10).await;

    app.alerts.reconcile_one(component.id).await.unwrap();
    assert_eq!(app.alerts.list().await.unwrap().len(), 1);

    // A movimentação já dispara a reconciliação internamente.
    app.movements
        .apply(
            &MovementRequest {
                component_id: component.id,
                movement_type: MovementType::Entrada,
                quantity: 10,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    assert!(app.alerts.list().await.unwrap().is_empty());
    let after = app.components.get(component.id).await.unwrap();
    assert_eq!(after.quantity_in_stock, 15);
}

#[tokio::test]
async fn saida_below_minimum_creates_alert_via_movement() {
    let app = test_app();
    let component = seed_component(&app, "Chave Táctil", 20, 10).await;

    app.movements
        .apply(
            &MovementRequest {
                component_id: component.id,
                movement_type: MovementType::Saida,
                quantity: 12,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    let alerts = app.alerts.list().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].component_id, component.id);
}

#[tokio::test]
async fn reconcile_all_corrects_drift_in_both_directions() {
    let app = test_app();
    let low = seed_component(&app, "Bateria CR2032", 1, 5).await;
    let recovered = seed_component(&app, "Suporte de Bateria", 50, 5).await;

    // Alerta obsoleto plantado diretamente no repositório, simulando
    // divergência acumulada.
    let stale = estoque_backend::models::alert::StockAlert {
        id: Uuid::new_v4(),
        component_id: recovered.id,
        message: "obsoleto".to_string(),
        created_at: chrono::Utc::now(),
    };
    AlertRepository::insert(&app.store, &stale).await.unwrap();

    let summary = app.alerts.reconcile_all().await.unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.removed, 1);

    let alerts = app.alerts.list().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].component_id, low.id);
}

#[tokio::test]
async fn generate_missing_never_deletes_stale_alerts() {
    let app = test_app();
    let low = seed_component(&app, "Sensor LDR", 0, 3).await;
    let recovered = seed_component(&app, "Buzzer", 50, 3).await;

    let stale = estoque_backend::models::alert::StockAlert {
        id: Uuid::new_v4(),
        component_id: recovered.id,
        message: "obsoleto".to_string(),
        created_at: chrono::Utc::now(),
    };
    AlertRepository::insert(&app.store, &stale).await.unwrap();

    let created = app.alerts.generate_missing().await.unwrap();
    assert_eq!(created, 1);

    // Assimétrico: o alerta obsoleto continua lá.
    let alerts = app.alerts.list().await.unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().any(|a| a.component_id == low.id));
    assert!(alerts.iter().any(|a| a.component_id == recovered.id));
}

#[tokio::test]
async fn generate_missing_is_idempotent_for_existing_alerts() {
    let app = test_app();
    seed_component(&app, "Display 7seg", 0, 2).await;

    assert_eq!(app.alerts.generate_missing().await.unwrap(), 1);
    assert_eq!(app.alerts.generate_missing().await.unwrap(), 0);
    assert_eq!(app.alerts.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_component_removes_its_alerts() {
    let app = test_app();
    let component = seed_component(&app, "Módulo WiFi", 0, 5).await;

    app.alerts.reconcile_one(component.id).await.unwrap();
    assert_eq!(app.alerts.list().await.unwrap().len(), 1);

    app.components.delete(component.id).await.unwrap();
    assert!(app.alerts.list().await.unwrap().is_empty());
}
