// src/db/movement_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::movement::StockMovement};

// O livro-razão de movimentações: apenas INSERT e leitura, nunca
// UPDATE ou DELETE.
#[async_trait]
pub trait MovementRepository: Send + Sync {
    async fn insert(&self, movement: &StockMovement) -> Result<(), AppError>;
    async fn list_by_component(&self, component_id: Uuid)
        -> Result<Vec<StockMovement>, AppError>;
    async fn list(&self) -> Result<Vec<StockMovement>, AppError>;
}

#[derive(Clone)]
pub struct PgMovementRepository {
    pool: PgPool,
}

impl PgMovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementRepository for PgMovementRepository {
    async fn insert(&self, m: &StockMovement) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO stock_movements
                (id, component_id, movement_type, quantity_changed, performed_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(m.id)
        .bind(m.component_id)
        .bind(m.movement_type)
        .bind(m.quantity_changed)
        .bind(m.performed_by)
        .bind(m.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_by_component(
        &self,
        component_id: Uuid,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements WHERE component_id = $1 ORDER BY created_at DESC",
        )
        .bind(component_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    async fn list(&self) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
