pub mod alert_service;
pub mod auth_service;
pub mod component_service;
pub mod hierarchy_service;
pub mod movement_service;
pub mod product_service;

pub use alert_service::AlertService;
pub use auth_service::AuthService;
pub use component_service::ComponentService;
pub use hierarchy_service::HierarchyService;
pub use movement_service::MovementService;
pub use product_service::ProductService;
