// src/services/product_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ComponentRepository, ProductRepository},
    models::product::{
        BomEntry, CreateProductPayload, Product, ProductComponent, ProductWithComponents,
        UpdateProductPayload,
    },
};

// Produtos montados a partir de componentes: um produto carrega sua
// lista de materiais como associações (component_id, quantidade).
#[derive(Clone)]
pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    component_repo: Arc<dyn ComponentRepository>,
}

impl ProductService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        component_repo: Arc<dyn ComponentRepository>,
    ) -> Self {
        Self {
            product_repo,
            component_repo,
        }
    }

    // Valida a lista de materiais antes de qualquer escrita: toda
    // quantidade positiva e todo componente existente.
    async fn check_bom(&self, entries: &[BomEntry]) -> Result<(), AppError> {
        for entry in entries {
            if entry.quantity <= 0 {
                return Err(AppError::InvalidQuantity);
            }
            self.component_repo
                .get(entry.component_id)
                .await?
                .ok_or(AppError::ComponentNotFound)?;
        }
        Ok(())
    }

    fn to_associations(product_id: Uuid, entries: &[BomEntry]) -> Vec<ProductComponent> {
        entries
            .iter()
            .map(|entry| ProductComponent {
                product_id,
                component_id: entry.component_id,
                quantity: entry.quantity,
            })
            .collect()
    }

    pub async fn create(
        &self,
        payload: CreateProductPayload,
    ) -> Result<ProductWithComponents, AppError> {
        payload.validate()?;
        self.check_bom(&payload.components).await?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            created_at: now,
            updated_at: now,
        };
        self.product_repo.insert(&product).await?;

        let associations = Self::to_associations(product.id, &payload.components);
        self.product_repo
            .replace_components(product.id, &associations)
            .await?;

        tracing::info!("🛠️ Produto '{}' criado", product.name);
        Ok(ProductWithComponents {
            product,
            components: associations,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductWithComponents, AppError> {
        let product = self
            .product_repo
            .get(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        let components = self.product_repo.list_components(id).await?;
        Ok(ProductWithComponents {
            product,
            components,
        })
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.list().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateProductPayload,
    ) -> Result<ProductWithComponents, AppError> {
        payload.validate()?;
        self.check_bom(&payload.components).await?;

        let mut product = self
            .product_repo
            .get(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        product.name = payload.name;
        product.description = payload.description;
        product.updated_at = Utc::now();
        self.product_repo.update(&product).await?;

        let associations = Self::to_associations(id, &payload.components);
        self.product_repo.replace_components(id, &associations).await?;

        Ok(ProductWithComponents {
            product,
            components: associations,
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.product_repo.delete_components(id).await?;
        if !self.product_repo.delete(id).await? {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    /// Quantas unidades do produto o estoque atual permite montar:
    /// o mínimo de floor(saldo / exigido) entre os componentes da
    /// lista de materiais. Lista vazia monta zero unidades.
    pub async fn producible_quantity(&self, id: Uuid) -> Result<i32, AppError> {
        self.product_repo
            .get(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let associations = self.product_repo.list_components(id).await?;
        if associations.is_empty() {
            return Ok(0);
        }

        let mut producible = i32::MAX;
        for pc in &associations {
            let component = self
                .component_repo
                .get(pc.component_id)
                .await?
                .ok_or(AppError::ComponentNotFound)?;
            producible = producible.min(component.quantity_in_stock / pc.quantity);
        }
        Ok(producible)
    }
}
