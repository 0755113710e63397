// src/db/hierarchy_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::hierarchy::{ComponentGroup, ComponentValue, Device, Package},
};

// CRUD dos 4 níveis da hierarquia. As buscas por (pai, nome) dão
// suporte à regra de unicidade escopada ao pai; as contagens de
// filhos dão suporte à política de exclusão (bloquear se não vazio).
#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    // --- Grupos (raiz) ---
    async fn get_group(&self, id: Uuid) -> Result<Option<ComponentGroup>, AppError>;
    async fn list_groups(&self) -> Result<Vec<ComponentGroup>, AppError>;
    async fn find_group_by_name(&self, name: &str)
        -> Result<Option<ComponentGroup>, AppError>;
    async fn insert_group(&self, group: &ComponentGroup) -> Result<(), AppError>;
    async fn update_group(&self, group: &ComponentGroup) -> Result<(), AppError>;
    async fn delete_group(&self, id: Uuid) -> Result<bool, AppError>;
    async fn count_devices_in_group(&self, group_id: Uuid) -> Result<i64, AppError>;

    // --- Dispositivos ---
    async fn get_device(&self, id: Uuid) -> Result<Option<Device>, AppError>;
    async fn list_devices(&self) -> Result<Vec<Device>, AppError>;
    async fn find_device_by_name(
        &self,
        group_id: Uuid,
        name: &str,
    ) -> Result<Option<Device>, AppError>;
    async fn insert_device(&self, device: &Device) -> Result<(), AppError>;
    async fn update_device(&self, device: &Device) -> Result<(), AppError>;
    async fn delete_device(&self, id: Uuid) -> Result<bool, AppError>;
    async fn count_values_in_device(&self, device_id: Uuid) -> Result<i64, AppError>;

    // --- Valores ---
    async fn get_value(&self, id: Uuid) -> Result<Option<ComponentValue>, AppError>;
    async fn list_values(&self) -> Result<Vec<ComponentValue>, AppError>;
    async fn find_value_by_name(
        &self,
        device_id: Uuid,
        name: &str,
    ) -> Result<Option<ComponentValue>, AppError>;
    async fn insert_value(&self, value: &ComponentValue) -> Result<(), AppError>;
    async fn update_value(&self, value: &ComponentValue) -> Result<(), AppError>;
    async fn delete_value(&self, id: Uuid) -> Result<bool, AppError>;
    async fn count_packages_in_value(&self, value_id: Uuid) -> Result<i64, AppError>;

    // --- Pacotes (folha) ---
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, AppError>;
    async fn list_packages(&self) -> Result<Vec<Package>, AppError>;
    async fn find_package_by_name(
        &self,
        value_id: Uuid,
        name: &str,
    ) -> Result<Option<Package>, AppError>;
    async fn insert_package(&self, package: &Package) -> Result<(), AppError>;
    async fn update_package(&self, package: &Package) -> Result<(), AppError>;
    async fn delete_package(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgHierarchyRepository {
    pool: PgPool,
}

impl PgHierarchyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte violação de unicidade do Postgres no nosso erro de
// conflito, como nas demais escritas com índice único.
fn map_unique_violation(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::NameAlreadyExists(name.to_string());
        }
    }
    e.into()
}

#[async_trait]
impl HierarchyRepository for PgHierarchyRepository {
    // --- Grupos ---

    async fn get_group(&self, id: Uuid) -> Result<Option<ComponentGroup>, AppError> {
        let maybe = sqlx::query_as::<_, ComponentGroup>(
            "SELECT * FROM component_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn list_groups(&self) -> Result<Vec<ComponentGroup>, AppError> {
        let groups = sqlx::query_as::<_, ComponentGroup>(
            "SELECT * FROM component_groups ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    async fn find_group_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ComponentGroup>, AppError> {
        let maybe = sqlx::query_as::<_, ComponentGroup>(
            "SELECT * FROM component_groups WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn insert_group(&self, g: &ComponentGroup) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO component_groups (id, name, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(g.id)
        .bind(&g.name)
        .bind(g.created_at)
        .bind(g.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &g.name))?;
        Ok(())
    }

    async fn update_group(&self, g: &ComponentGroup) -> Result<(), AppError> {
        sqlx::query("UPDATE component_groups SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(g.id)
            .bind(&g.name)
            .bind(g.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &g.name))?;
        Ok(())
    }

    async fn delete_group(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM component_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_devices_in_group(&self, group_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM devices WHERE group_id = $1")
                .bind(group_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    // --- Dispositivos ---

    async fn get_device(&self, id: Uuid) -> Result<Option<Device>, AppError> {
        let maybe = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    async fn list_devices(&self) -> Result<Vec<Device>, AppError> {
        let devices =
            sqlx::query_as::<_, Device>("SELECT * FROM devices ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(devices)
    }

    async fn find_device_by_name(
        &self,
        group_id: Uuid,
        name: &str,
    ) -> Result<Option<Device>, AppError> {
        let maybe = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE group_id = $1 AND name = $2",
        )
        .bind(group_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn insert_device(&self, d: &Device) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO devices (id, group_id, name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(d.id)
        .bind(d.group_id)
        .bind(&d.name)
        .bind(d.created_at)
        .bind(d.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &d.name))?;
        Ok(())
    }

    async fn update_device(&self, d: &Device) -> Result<(), AppError> {
        sqlx::query("UPDATE devices SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(d.id)
            .bind(&d.name)
            .bind(d.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &d.name))?;
        Ok(())
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_values_in_device(&self, device_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM component_values WHERE device_id = $1")
                .bind(device_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    // --- Valores ---

    async fn get_value(&self, id: Uuid) -> Result<Option<ComponentValue>, AppError> {
        let maybe = sqlx::query_as::<_, ComponentValue>(
            "SELECT * FROM component_values WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn list_values(&self) -> Result<Vec<ComponentValue>, AppError> {
        let values = sqlx::query_as::<_, ComponentValue>(
            "SELECT * FROM component_values ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(values)
    }

    async fn find_value_by_name(
        &self,
        device_id: Uuid,
        name: &str,
    ) -> Result<Option<ComponentValue>, AppError> {
        let maybe = sqlx::query_as::<_, ComponentValue>(
            "SELECT * FROM component_values WHERE device_id = $1 AND name = $2",
        )
        .bind(device_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn insert_value(&self, v: &ComponentValue) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO component_values (id, device_id, name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(v.id)
        .bind(v.device_id)
        .bind(&v.name)
        .bind(v.created_at)
        .bind(v.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &v.name))?;
        Ok(())
    }

    async fn update_value(&self, v: &ComponentValue) -> Result<(), AppError> {
        sqlx::query("UPDATE component_values SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(v.id)
            .bind(&v.name)
            .bind(v.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &v.name))?;
        Ok(())
    }

    async fn delete_value(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM component_values WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_packages_in_value(&self, value_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM packages WHERE value_id = $1")
                .bind(value_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    // --- Pacotes ---

    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, AppError> {
        let maybe = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    async fn list_packages(&self) -> Result<Vec<Package>, AppError> {
        let packages =
            sqlx::query_as::<_, Package>("SELECT * FROM packages ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(packages)
    }

    async fn find_package_by_name(
        &self,
        value_id: Uuid,
        name: &str,
    ) -> Result<Option<Package>, AppError> {
        let maybe = sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE value_id = $1 AND name = $2",
        )
        .bind(value_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    async fn insert_package(&self, p: &Package) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO packages (id, value_id, name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(p.id)
        .bind(p.value_id)
        .bind(&p.name)
        .bind(p.created_at)
        .bind(p.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &p.name))?;
        Ok(())
    }

    async fn update_package(&self, p: &Package) -> Result<(), AppError> {
        sqlx::query("UPDATE packages SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(p.id)
            .bind(&p.name)
            .bind(p.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &p.name))?;
        Ok(())
    }

    async fn delete_package(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
