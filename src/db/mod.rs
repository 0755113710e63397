// src/db/mod.rs
//
// A superfície de acesso a dados da aplicação. Os serviços só
// enxergam os traits; as implementações Postgres (Pg*) e a
// implementação em memória (MemoryStore) são intercambiáveis.

pub mod alert_repo;
pub mod component_repo;
pub mod hierarchy_repo;
pub mod memory;
pub mod movement_repo;
pub mod product_repo;
pub mod user_repo;

pub use alert_repo::{AlertRepository, PgAlertRepository};
pub use component_repo::{ComponentRepository, PgComponentRepository};
pub use hierarchy_repo::{HierarchyRepository, PgHierarchyRepository};
pub use memory::MemoryStore;
pub use movement_repo::{MovementRepository, PgMovementRepository};
pub use product_repo::{PgProductRepository, ProductRepository};
pub use user_repo::{
    PasswordResetTokenRepository, PgPasswordResetTokenRepository, PgUserRepository,
    UserRepository,
};
