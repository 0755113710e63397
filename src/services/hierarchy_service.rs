// src/services/hierarchy_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::HierarchyRepository,
    models::hierarchy::{
        ComponentGroup, ComponentValue, CreateChildPayload, CreateGroupPayload, Device,
        Package, RenamePayload,
    },
};

// CRUD da árvore de classificação Grupo → Dispositivo → Valor → Pacote.
// Regras em todos os níveis:
//  - criar filho exige pai existente;
//  - nome é único dentro do pai;
//  - excluir um nível com filhos é bloqueado (política explícita:
//    bloquear, não cascatear).
#[derive(Clone)]
pub struct HierarchyService {
    hierarchy_repo: Arc<dyn HierarchyRepository>,
}

impl HierarchyService {
    pub fn new(hierarchy_repo: Arc<dyn HierarchyRepository>) -> Self {
        Self { hierarchy_repo }
    }

    // --- Grupos ---

    pub async fn create_group(
        &self,
        payload: CreateGroupPayload,
    ) -> Result<ComponentGroup, AppError> {
        payload.validate()?;

        if self
            .hierarchy_repo
            .find_group_by_name(&payload.name)
            .await?
            .is_some()
        {
            return Err(AppError::NameAlreadyExists(payload.name));
        }

        let now = Utc::now();
        let group = ComponentGroup {
            id: Uuid::new_v4(),
            name: payload.name,
            created_at: now,
            updated_at: now,
        };
        self.hierarchy_repo.insert_group(&group).await?;
        Ok(group)
    }

    pub async fn list_groups(&self) -> Result<Vec<ComponentGroup>, AppError> {
        self.hierarchy_repo.list_groups().await
    }

    pub async fn rename_group(
        &self,
        id: Uuid,
        payload: RenamePayload,
    ) -> Result<ComponentGroup, AppError> {
        payload.validate()?;

        let mut group = self
            .hierarchy_repo
            .get_group(id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if let Some(other) = self.hierarchy_repo.find_group_by_name(&payload.name).await? {
            if other.id != id {
                return Err(AppError::NameAlreadyExists(payload.name));
            }
        }

        group.name = payload.name;
        group.updated_at = Utc::now();
        self.hierarchy_repo.update_group(&group).await?;
        Ok(group)
    }

    pub async fn delete_group(&self, id: Uuid) -> Result<(), AppError> {
        if self.hierarchy_repo.count_devices_in_group(id).await? > 0 {
            return Err(AppError::HierarchyNotEmpty);
        }
        if !self.hierarchy_repo.delete_group(id).await? {
            return Err(AppError::HierarchyNodeNotFound);
        }
        Ok(())
    }

    // --- Dispositivos ---

    pub async fn create_device(
        &self,
        payload: CreateChildPayload,
    ) -> Result<Device, AppError> {
        payload.validate()?;

        self.hierarchy_repo
            .get_group(payload.parent_id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if self
            .hierarchy_repo
            .find_device_by_name(payload.parent_id, &payload.name)
            .await?
            .is_some()
        {
            return Err(AppError::NameAlreadyExists(payload.name));
        }

        let now = Utc::now();
        let device = Device {
            id: Uuid::new_v4(),
            group_id: payload.parent_id,
            name: payload.name,
            created_at: now,
            updated_at: now,
        };
        self.hierarchy_repo.insert_device(&device).await?;
        Ok(device)
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>, AppError> {
        self.hierarchy_repo.list_devices().await
    }

    pub async fn rename_device(
        &self,
        id: Uuid,
        payload: RenamePayload,
    ) -> Result<Device, AppError> {
        payload.validate()?;

        let mut device = self
            .hierarchy_repo
            .get_device(id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if let Some(other) = self
            .hierarchy_repo
            .find_device_by_name(device.group_id, &payload.name)
            .await?
        {
            if other.id != id {
                return Err(AppError::NameAlreadyExists(payload.name));
            }
        }

        device.name = payload.name;
        device.updated_at = Utc::now();
        self.hierarchy_repo.update_device(&device).await?;
        Ok(device)
    }

    pub async fn delete_device(&self, id: Uuid) -> Result<(), AppError> {
        if self.hierarchy_repo.count_values_in_device(id).await? > 0 {
            return Err(AppError::HierarchyNotEmpty);
        }
        if !self.hierarchy_repo.delete_device(id).await? {
            return Err(AppError::HierarchyNodeNotFound);
        }
        Ok(())
    }

    // --- Valores ---

    pub async fn create_value(
        &self,
        payload: CreateChildPayload,
    ) -> Result<ComponentValue, AppError> {
        payload.validate()?;

        self.hierarchy_repo
            .get_device(payload.parent_id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if self
            .hierarchy_repo
            .find_value_by_name(payload.parent_id, &payload.name)
            .await?
            .is_some()
        {
            return Err(AppError::NameAlreadyExists(payload.name));
        }

        let now = Utc::now();
        let value = ComponentValue {
            id: Uuid::new_v4(),
            device_id: payload.parent_id,
            name: payload.name,
            created_at: now,
            updated_at: now,
        };
        self.hierarchy_repo.insert_value(&value).await?;
        Ok(value)
    }

    pub async fn list_values(&self) -> Result<Vec<ComponentValue>, AppError> {
        self.hierarchy_repo.list_values().await
    }

    pub async fn rename_value(
        &self,
        id: Uuid,
        payload: RenamePayload,
    ) -> Result<ComponentValue, AppError> {
        payload.validate()?;

        let mut value = self
            .hierarchy_repo
            .get_value(id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if let Some(other) = self
            .hierarchy_repo
            .find_value_by_name(value.device_id, &payload.name)
            .await?
        {
            if other.id != id {
                return Err(AppError::NameAlreadyExists(payload.name));
            }
        }

        value.name = payload.name;
        value.updated_at = Utc::now();
        self.hierarchy_repo.update_value(&value).await?;
        Ok(value)
    }

    pub async fn delete_value(&self, id: Uuid) -> Result<(), AppError> {
        if self.hierarchy_repo.count_packages_in_value(id).await? > 0 {
            return Err(AppError::HierarchyNotEmpty);
        }
        if !self.hierarchy_repo.delete_value(id).await? {
            return Err(AppError::HierarchyNodeNotFound);
        }
        Ok(())
    }

    // --- Pacotes ---

    pub async fn create_package(
        &self,
        payload: CreateChildPayload,
    ) -> Result<Package, AppError> {
        payload.validate()?;

        self.hierarchy_repo
            .get_value(payload.parent_id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if self
            .hierarchy_repo
            .find_package_by_name(payload.parent_id, &payload.name)
            .await?
            .is_some()
        {
            return Err(AppError::NameAlreadyExists(payload.name));
        }

        let now = Utc::now();
        let package = Package {
            id: Uuid::new_v4(),
            value_id: payload.parent_id,
            name: payload.name,
            created_at: now,
            updated_at: now,
        };
        self.hierarchy_repo.insert_package(&package).await?;
        Ok(package)
    }

    pub async fn list_packages(&self) -> Result<Vec<Package>, AppError> {
        self.hierarchy_repo.list_packages().await
    }

    pub async fn rename_package(
        &self,
        id: Uuid,
        payload: RenamePayload,
    ) -> Result<Package, AppError> {
        payload.validate()?;

        let mut package = self
            .hierarchy_repo
            .get_package(id)
            .await?
            .ok_or(AppError::HierarchyNodeNotFound)?;

        if let Some(other) = self
            .hierarchy_repo
            .find_package_by_name(package.value_id, &payload.name)
            .await?
        {
            if other.id != id {
                return Err(AppError::NameAlreadyExists(payload.name));
            }
        }

        package.name = payload.name;
        package.updated_at = Utc::now();
        self.hierarchy_repo.update_package(&package).await?;
        Ok(package)
    }

    pub async fn delete_package(&self, id: Uuid) -> Result<(), AppError> {
        if !self.hierarchy_repo.delete_package(id).await? {
            return Err(AppError::HierarchyNodeNotFound);
        }
        Ok(())
    }

    // --- Filtros por ancestral ---
    // Filtros em memória sobre os dados já carregados, para montar as
    // listas encadeadas da interface (grupo selecionado → dispositivos,
    // e assim por diante).

    pub async fn devices_in_groups(&self, group_ids: &[Uuid]) -> Result<Vec<Device>, AppError> {
        let mut devices = self.hierarchy_repo.list_devices().await?;
        devices.retain(|d| group_ids.contains(&d.group_id));
        Ok(devices)
    }

    pub async fn values_in_devices(
        &self,
        device_ids: &[Uuid],
    ) -> Result<Vec<ComponentValue>, AppError> {
        let mut values = self.hierarchy_repo.list_values().await?;
        values.retain(|v| device_ids.contains(&v.device_id));
        Ok(values)
    }

    pub async fn packages_in_values(
        &self,
        value_ids: &[Uuid],
    ) -> Result<Vec<Package>, AppError> {
        let mut packages = self.hierarchy_repo.list_packages().await?;
        packages.retain(|p| value_ids.contains(&p.value_id));
        Ok(packages)
    }
}
