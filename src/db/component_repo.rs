// src/db/component_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::component::Component};

// Interface de persistência dos componentes. As entidades chegam
// prontas do serviço (id e timestamps já atribuídos); o repositório
// apenas grava e lê.
#[async_trait]
pub trait ComponentRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Component>, AppError>;
    async fn list(&self) -> Result<Vec<Component>, AppError>;
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Component>, AppError>;
    async fn insert(&self, component: &Component) -> Result<(), AppError>;
    async fn update(&self, component: &Component) -> Result<(), AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgComponentRepository {
    pool: PgPool,
}

impl PgComponentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComponentRepository for PgComponentRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Component>, AppError> {
        let maybe = sqlx::query_as::<_, Component>(
            "SELECT * FROM components WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn list(&self) -> Result<Vec<Component>, AppError> {
        let components = sqlx::query_as::<_, Component>(
            "SELECT * FROM components ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(components)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Component>, AppError> {
        let components = sqlx::query_as::<_, Component>(
            "SELECT * FROM components WHERE name ILIKE '%' || $1 || '%' ORDER BY name ASC",
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;
        Ok(components)
    }

    async fn insert(&self, c: &Component) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO components
                (id, name, group_name, device_name, value_name, package_name,
                 quantity_in_stock, minimum_quantity, price, drawer, division,
                 last_entry_at, last_exit_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(c.id)
        .bind(&c.name)
        .bind(&c.group_name)
        .bind(&c.device_name)
        .bind(&c.value_name)
        .bind(&c.package_name)
        .bind(c.quantity_in_stock)
        .bind(c.minimum_quantity)
        .bind(c.price)
        .bind(&c.drawer)
        .bind(&c.division)
        .bind(c.last_entry_at)
        .bind(c.last_exit_at)
        .bind(c.created_at)
        .bind(c.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, c: &Component) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE components SET
                name = $2, group_name = $3, device_name = $4, value_name = $5,
                package_name = $6, quantity_in_stock = $7, minimum_quantity = $8,
                price = $9, drawer = $10, division = $11,
                last_entry_at = $12, last_exit_at = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(c.id)
        .bind(&c.name)
        .bind(&c.group_name)
        .bind(&c.device_name)
        .bind(&c.value_name)
        .bind(&c.package_name)
        .bind(c.quantity_in_stock)
        .bind(c.minimum_quantity)
        .bind(c.price)
        .bind(&c.drawer)
        .bind(&c.division)
        .bind(c.last_entry_at)
        .bind(c.last_exit_at)
        .bind(c.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
