// src/db/memory.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        alert::StockAlert,
        auth::{PasswordResetToken, User},
        component::Component,
        hierarchy::{ComponentGroup, ComponentValue, Device, Package},
        movement::StockMovement,
        product::{Product, ProductComponent},
    },
};

use super::{
    AlertRepository, ComponentRepository, HierarchyRepository, MovementRepository,
    PasswordResetTokenRepository, ProductRepository, UserRepository,
};

// Backend de repositórios em memória. Usado pelos testes de
// integração e por ambientes locais sem Postgres. Reproduz o
// comportamento observável das implementações Pg: ordenação por nome,
// unicidade escopada ao pai e alerta único por componente.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    components: HashMap<Uuid, Component>,
    movements: Vec<StockMovement>,
    alerts: HashMap<Uuid, StockAlert>, // chave: component_id

    groups: HashMap<Uuid, ComponentGroup>,
    devices: HashMap<Uuid, Device>,
    values: HashMap<Uuid, ComponentValue>,
    packages: HashMap<Uuid, Package>,

    products: HashMap<Uuid, Product>,
    product_components: Vec<ProductComponent>,

    users: HashMap<Uuid, User>,
    reset_tokens: HashMap<String, PasswordResetToken>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_name<T, F>(mut items: Vec<T>, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

#[async_trait]
impl ComponentRepository for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Component>, AppError> {
        Ok(self.inner.read().await.components.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Component>, AppError> {
        let items: Vec<_> = self.inner.read().await.components.values().cloned().collect();
        Ok(sorted_by_name(items, |c| &c.name))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Component>, AppError> {
        let needle = fragment.to_lowercase();
        let items: Vec<_> = self
            .inner
            .read()
            .await
            .components
            .values()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(sorted_by_name(items, |c| &c.name))
    }

    async fn insert(&self, component: &Component) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .components
            .insert(component.id, component.clone());
        Ok(())
    }

    async fn update(&self, component: &Component) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .components
            .insert(component.id, component.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.components.remove(&id).is_some())
    }
}

#[async_trait]
impl MovementRepository for MemoryStore {
    async fn insert(&self, movement: &StockMovement) -> Result<(), AppError> {
        self.inner.write().await.movements.push(movement.clone());
        Ok(())
    }

    async fn list_by_component(
        &self,
        component_id: Uuid,
    ) -> Result<Vec<StockMovement>, AppError> {
        let mut items: Vec<_> = self
            .inner
            .read()
            .await
            .movements
            .iter()
            .filter(|m| m.component_id == component_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list(&self) -> Result<Vec<StockMovement>, AppError> {
        let mut items = self.inner.read().await.movements.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

#[async_trait]
impl AlertRepository for MemoryStore {
    async fn find_by_component(
        &self,
        component_id: Uuid,
    ) -> Result<Option<StockAlert>, AppError> {
        Ok(self.inner.read().await.alerts.get(&component_id).cloned())
    }

    async fn list(&self) -> Result<Vec<StockAlert>, AppError> {
        let mut items: Vec<_> = self.inner.read().await.alerts.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert(&self, alert: &StockAlert) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .alerts
            .insert(alert.component_id, alert.clone());
        Ok(())
    }

    async fn delete_by_component(&self, component_id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.alerts.remove(&component_id).is_some())
    }
}

#[async_trait]
impl HierarchyRepository for MemoryStore {
    // --- Grupos ---

    async fn get_group(&self, id: Uuid) -> Result<Option<ComponentGroup>, AppError> {
        Ok(self.inner.read().await.groups.get(&id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<ComponentGroup>, AppError> {
        let items: Vec<_> = self.inner.read().await.groups.values().cloned().collect();
        Ok(sorted_by_name(items, |g| &g.name))
    }

    async fn find_group_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ComponentGroup>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .groups
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn insert_group(&self, group: &ComponentGroup) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner.groups.values().any(|g| g.name == group.name) {
            return Err(AppError::NameAlreadyExists(group.name.clone()));
        }
        inner.groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn update_group(&self, group: &ComponentGroup) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .groups
            .values()
            .any(|g| g.id != group.id && g.name == group.name)
        {
            return Err(AppError::NameAlreadyExists(group.name.clone()));
        }
        inner.groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn delete_group(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.groups.remove(&id).is_some())
    }

    async fn count_devices_in_group(&self, group_id: Uuid) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .devices
            .values()
            .filter(|d| d.group_id == group_id)
            .count() as i64)
    }

    // --- Dispositivos ---

    async fn get_device(&self, id: Uuid) -> Result<Option<Device>, AppError> {
        Ok(self.inner.read().await.devices.get(&id).cloned())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, AppError> {
        let items: Vec<_> = self.inner.read().await.devices.values().cloned().collect();
        Ok(sorted_by_name(items, |d| &d.name))
    }

    async fn find_device_by_name(
        &self,
        group_id: Uuid,
        name: &str,
    ) -> Result<Option<Device>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .devices
            .values()
            .find(|d| d.group_id == group_id && d.name == name)
            .cloned())
    }

    async fn insert_device(&self, device: &Device) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .devices
            .values()
            .any(|d| d.group_id == device.group_id && d.name == device.name)
        {
            return Err(AppError::NameAlreadyExists(device.name.clone()));
        }
        inner.devices.insert(device.id, device.clone());
        Ok(())
    }

    async fn update_device(&self, device: &Device) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .devices
            .values()
            .any(|d| d.id != device.id && d.group_id == device.group_id && d.name == device.name)
        {
            return Err(AppError::NameAlreadyExists(device.name.clone()));
        }
        inner.devices.insert(device.id, device.clone());
        Ok(())
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.devices.remove(&id).is_some())
    }

    async fn count_values_in_device(&self, device_id: Uuid) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .values
            .values()
            .filter(|v| v.device_id == device_id)
            .count() as i64)
    }

    // --- Valores ---

    async fn get_value(&self, id: Uuid) -> Result<Option<ComponentValue>, AppError> {
        Ok(self.inner.read().await.values.get(&id).cloned())
    }

    async fn list_values(&self) -> Result<Vec<ComponentValue>, AppError> {
        let items: Vec<_> = self.inner.read().await.values.values().cloned().collect();
        Ok(sorted_by_name(items, |v| &v.name))
    }

    async fn find_value_by_name(
        &self,
        device_id: Uuid,
        name: &str,
    ) -> Result<Option<ComponentValue>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .values
            .values()
            .find(|v| v.device_id == device_id && v.name == name)
            .cloned())
    }

    async fn insert_value(&self, value: &ComponentValue) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .values
            .values()
            .any(|v| v.device_id == value.device_id && v.name == value.name)
        {
            return Err(AppError::NameAlreadyExists(value.name.clone()));
        }
        inner.values.insert(value.id, value.clone());
        Ok(())
    }

    async fn update_value(&self, value: &ComponentValue) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .values
            .values()
            .any(|v| v.id != value.id && v.device_id == value.device_id && v.name == value.name)
        {
            return Err(AppError::NameAlreadyExists(value.name.clone()));
        }
        inner.values.insert(value.id, value.clone());
        Ok(())
    }

    async fn delete_value(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.values.remove(&id).is_some())
    }

    async fn count_packages_in_value(&self, value_id: Uuid) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .packages
            .values()
            .filter(|p| p.value_id == value_id)
            .count() as i64)
    }

    // --- Pacotes ---

    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, AppError> {
        Ok(self.inner.read().await.packages.get(&id).cloned())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, AppError> {
        let items: Vec<_> = self.inner.read().await.packages.values().cloned().collect();
        Ok(sorted_by_name(items, |p| &p.name))
    }

    async fn find_package_by_name(
        &self,
        value_id: Uuid,
        name: &str,
    ) -> Result<Option<Package>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .packages
            .values()
            .find(|p| p.value_id == value_id && p.name == name)
            .cloned())
    }

    async fn insert_package(&self, package: &Package) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .packages
            .values()
            .any(|p| p.value_id == package.value_id && p.name == package.name)
        {
            return Err(AppError::NameAlreadyExists(package.name.clone()));
        }
        inner.packages.insert(package.id, package.clone());
        Ok(())
    }

    async fn update_package(&self, package: &Package) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .packages
            .values()
            .any(|p| p.id != package.id && p.value_id == package.value_id && p.name == package.name)
        {
            return Err(AppError::NameAlreadyExists(package.name.clone()));
        }
        inner.packages.insert(package.id, package.clone());
        Ok(())
    }

    async fn delete_package(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.packages.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let items: Vec<_> = self.inner.read().await.products.values().cloned().collect();
        Ok(sorted_by_name(items, |p| &p.name))
    }

    async fn insert(&self, product: &Product) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.inner.write().await.products.remove(&id).is_some())
    }

    async fn list_components(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductComponent>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .product_components
            .iter()
            .filter(|pc| pc.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn replace_components(
        &self,
        product_id: Uuid,
        components: &[ProductComponent],
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner
            .product_components
            .retain(|pc| pc.product_id != product_id);
        inner.product_components.extend_from_slice(components);
        Ok(())
    }

    async fn delete_components(&self, product_id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .product_components
            .retain(|pc| pc.product_id != product_id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&user_id) {
            user.password_hash = password_hash.to_string();
            user.updated_at = chrono::Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl PasswordResetTokenRepository for MemoryStore {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .reset_tokens
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, AppError> {
        Ok(self.inner.read().await.reset_tokens.get(token).cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(t) = inner.reset_tokens.values_mut().find(|t| t.id == id) {
            t.used = true;
        }
        Ok(())
    }
}
