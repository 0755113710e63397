// src/db/product_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductComponent},
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn list(&self) -> Result<Vec<Product>, AppError>;
    async fn insert(&self, product: &Product) -> Result<(), AppError>;
    async fn update(&self, product: &Product) -> Result<(), AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    // Lista de materiais: substituição integral do conjunto de
    // associações do produto.
    async fn list_components(&self, product_id: Uuid)
        -> Result<Vec<ProductComponent>, AppError>;
    async fn replace_components(
        &self,
        product_id: Uuid,
        components: &[ProductComponent],
    ) -> Result<(), AppError>;
    async fn delete_components(&self, product_id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let maybe = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    async fn insert(&self, p: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.created_at)
        .bind(p.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, p: &Product) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE products SET name = $2, description = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_components(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductComponent>, AppError> {
        let components = sqlx::query_as::<_, ProductComponent>(
            "SELECT * FROM product_components WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(components)
    }

    async fn replace_components(
        &self,
        product_id: Uuid,
        components: &[ProductComponent],
    ) -> Result<(), AppError> {
        self.delete_components(product_id).await?;
        for pc in components {
            sqlx::query(
                r#"
                INSERT INTO product_components (product_id, component_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(pc.product_id)
            .bind(pc.component_id)
            .bind(pc.quantity)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn delete_components(&self, product_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM product_components WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
