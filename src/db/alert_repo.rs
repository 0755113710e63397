// src/db/alert_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::alert::StockAlert};

// Cada componente tem no máximo um alerta aberto, então a busca é
// sempre por component_id.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn find_by_component(&self, component_id: Uuid)
        -> Result<Option<StockAlert>, AppError>;
    async fn list(&self) -> Result<Vec<StockAlert>, AppError>;
    async fn insert(&self, alert: &StockAlert) -> Result<(), AppError>;
    async fn delete_by_component(&self, component_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgAlertRepository {
    pool: PgPool,
}

impl PgAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertRepository for PgAlertRepository {
    async fn find_by_component(
        &self,
        component_id: Uuid,
    ) -> Result<Option<StockAlert>, AppError> {
        let maybe = sqlx::query_as::<_, StockAlert>(
            "SELECT * FROM stock_alerts WHERE component_id = $1",
        )
        .bind(component_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn list(&self) -> Result<Vec<StockAlert>, AppError> {
        let alerts = sqlx::query_as::<_, StockAlert>(
            "SELECT * FROM stock_alerts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(alerts)
    }

    async fn insert(&self, alert: &StockAlert) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO stock_alerts (id, component_id, message, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(alert.id)
        .bind(alert.component_id)
        .bind(&alert.message)
        .bind(alert.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_component(&self, component_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stock_alerts WHERE component_id = $1")
            .bind(component_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
