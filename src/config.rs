// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{
    PgAlertRepository, PgComponentRepository, PgHierarchyRepository,
    PgMovementRepository, PgPasswordResetTokenRepository, PgProductRepository,
    PgUserRepository,
};
use crate::services::{
    AlertService, AuthService, ComponentService, HierarchyService, MovementService,
    ProductService,
};

/// Inicializa o logger global. Chamar uma única vez, no começo do
/// processo.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}

// Configuração carregada do ambiente (.env em desenvolvimento).
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // Em produção as variáveis vêm do ambiente; o .env é opcional.
        let _ = dotenvy::dotenv();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;

        Ok(Self {
            database_url,
            jwt_secret,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub component_service: ComponentService,
    pub movement_service: MovementService,
    pub alert_service: AlertService,
    pub hierarchy_service: HierarchyService,
    pub product_service: ProductService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                return Err(e.into());
            }
        };

        let component_repo = Arc::new(PgComponentRepository::new(db_pool.clone()));
        let movement_repo = Arc::new(PgMovementRepository::new(db_pool.clone()));
        let alert_repo = Arc::new(PgAlertRepository::new(db_pool.clone()));
        let hierarchy_repo = Arc::new(PgHierarchyRepository::new(db_pool.clone()));
        let product_repo = Arc::new(PgProductRepository::new(db_pool.clone()));
        let user_repo = Arc::new(PgUserRepository::new(db_pool.clone()));
        let token_repo = Arc::new(PgPasswordResetTokenRepository::new(db_pool.clone()));

        let alert_service = AlertService::new(component_repo.clone(), alert_repo.clone());
        let movement_service = MovementService::new(
            component_repo.clone(),
            movement_repo,
            alert_service.clone(),
        );
        let component_service =
            ComponentService::new(component_repo.clone(), alert_repo);
        let hierarchy_service = HierarchyService::new(hierarchy_repo);
        let product_service = ProductService::new(product_repo, component_repo);
        let auth_service = AuthService::new(user_repo, token_repo, config.jwt_secret);

        Ok(Self {
            db_pool,
            component_service,
            movement_service,
            alert_service,
            hierarchy_service,
            product_service,
            auth_service,
        })
    }

    /// Roda as migrações embutidas do SQLx. Se falhar, a aplicação
    /// não deve subir.
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::migrate!().run(&self.db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
        Ok(())
    }
}
