// tests/common/mod.rs
//
// Fixtures dos testes de integração: monta todos os serviços sobre o
// backend em memória, sem Postgres.

use std::sync::Arc;

use estoque_backend::db::{
    AlertRepository, ComponentRepository, HierarchyRepository, MemoryStore,
    MovementRepository, PasswordResetTokenRepository, ProductRepository, UserRepository,
};
use estoque_backend::models::component::{
    Component, ComponentFields, CreateComponentPayload,
};
use estoque_backend::services::{
    AlertService, AuthService, ComponentService, HierarchyService, MovementService,
    ProductService,
};

pub struct TestApp {
    pub store: MemoryStore,
    pub components: ComponentService,
    pub movements: MovementService,
    pub alerts: AlertService,
    pub hierarchy: HierarchyService,
    pub products: ProductService,
    pub auth: AuthService,
}

pub fn test_app() -> TestApp {
    let store = MemoryStore::new();

    let component_repo: Arc<dyn ComponentRepository> = Arc::new(store.clone());
    let movement_repo: Arc<dyn MovementRepository> = Arc::new(store.clone());
    let alert_repo: Arc<dyn AlertRepository> = Arc::new(store.clone());
    let hierarchy_repo: Arc<dyn HierarchyRepository> = Arc::new(store.clone());
    let product_repo: Arc<dyn ProductRepository> = Arc::new(store.clone());
    let user_repo: Arc<dyn UserRepository> = Arc::new(store.clone());
    let token_repo: Arc<dyn PasswordResetTokenRepository> = Arc::new(store.clone());

    let alerts = AlertService::new(component_repo.clone(), alert_repo.clone());
    let movements =
        MovementService::new(component_repo.clone(), movement_repo, alerts.clone());
    let components = ComponentService::new(component_repo.clone(), alert_repo);
    let hierarchy = HierarchyService::new(hierarchy_repo);
    let products = ProductService::new(product_repo, component_repo);
    let auth = AuthService::new(user_repo, token_repo, "segredo-de-teste".to_string());

    TestApp {
        store,
        components,
        movements,
        alerts,
        hierarchy,
        products,
        auth,
    }
}

pub fn component_payload(name: &str, initial: i32, minimum: i32) -> CreateComponentPayload {
    CreateComponentPayload {
        fields: ComponentFields {
            name: name.to_string(),
            group_name: None,
            device_name: None,
            value_name: None,
            package_name: None,
            minimum_quantity: minimum,
            price: None,
            drawer: None,
            division: None,
        },
        initial_quantity: initial,
    }
}

pub async fn seed_component(app: &TestApp, name: &str, initial: i32, minimum: i32) -> Component {
    app.components
        .create(component_payload(name, initial, minimum))
        .await
        .expect("falha ao criar componente de teste")
}
