// src/services/component_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{AlertRepository, ComponentRepository},
    models::component::{Component, CreateComponentPayload, UpdateComponentPayload},
};

// CRUD de componentes. O componente é dono dos seus alertas: ao
// excluir, os alertas vão junto. As movimentações ficam no
// livro-razão e não são tocadas.
#[derive(Clone)]
pub struct ComponentService {
    component_repo: Arc<dyn ComponentRepository>,
    alert_repo: Arc<dyn AlertRepository>,
}

impl ComponentService {
    pub fn new(
        component_repo: Arc<dyn ComponentRepository>,
        alert_repo: Arc<dyn AlertRepository>,
    ) -> Self {
        Self {
            component_repo,
            alert_repo,
        }
    }

    pub async fn create(&self, payload: CreateComponentPayload) -> Result<Component, AppError> {
        payload.validate()?;

        let now = Utc::now();
        let component = Component {
            id: Uuid::new_v4(),
            name: payload.fields.name,
            group_name: payload.fields.group_name,
            device_name: payload.fields.device_name,
            value_name: payload.fields.value_name,
            package_name: payload.fields.package_name,
            quantity_in_stock: payload.initial_quantity,
            minimum_quantity: payload.fields.minimum_quantity,
            price: payload.fields.price,
            drawer: payload.fields.drawer,
            division: payload.fields.division,
            last_entry_at: None,
            last_exit_at: None,
            created_at: now,
            updated_at: now,
        };
        self.component_repo.insert(&component).await?;

        tracing::info!("🧩 Componente '{}' criado", component.name);
        Ok(component)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateComponentPayload,
    ) -> Result<Component, AppError> {
        payload.validate()?;

        let mut component = self
            .component_repo
            .get(id)
            .await?
            .ok_or(AppError::ComponentNotFound)?;

        component.name = payload.fields.name;
        component.group_name = payload.fields.group_name;
        component.device_name = payload.fields.device_name;
        component.value_name = payload.fields.value_name;
        component.package_name = payload.fields.package_name;
        component.minimum_quantity = payload.fields.minimum_quantity;
        component.price = payload.fields.price;
        component.drawer = payload.fields.drawer;
        component.division = payload.fields.division;
        component.updated_at = Utc::now();

        self.component_repo.update(&component).await?;
        Ok(component)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Alertas pertencem ao componente e saem junto com ele.
        self.alert_repo.delete_by_component(id).await?;

        if !self.component_repo.delete(id).await? {
            return Err(AppError::ComponentNotFound);
        }
        tracing::info!("🗑️ Componente {} excluído", id);
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Component, AppError> {
        self.component_repo
            .get(id)
            .await?
            .ok_or(AppError::ComponentNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Component>, AppError> {
        self.component_repo.list().await
    }

    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Component>, AppError> {
        self.component_repo.search_by_name(fragment).await
    }
}
