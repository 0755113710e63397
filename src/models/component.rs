// src/models/component.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// --- Componente (catálogo + saldo) ---
// Os campos de classificação (grupo, dispositivo, valor, pacote) são
// strings denormalizadas, não FKs para as tabelas da hierarquia.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Uuid,
    pub name: String,

    pub group_name: Option<String>,
    pub device_name: Option<String>,
    pub value_name: Option<String>,
    pub package_name: Option<String>,

    pub quantity_in_stock: i32,
    pub minimum_quantity: i32,
    pub price: Option<Decimal>,

    // Localização física no almoxarifado
    pub drawer: Option<String>,
    pub division: Option<String>,

    pub last_entry_at: Option<DateTime<Utc>>,
    pub last_exit_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Campos compartilhados entre criação e atualização ---
// Composição em vez de herança de DTO: o mesmo bloco de campos é
// embutido (flatten) nos dois payloads.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFields {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub group_name: Option<String>,
    pub device_name: Option<String>,
    pub value_name: Option<String>,
    pub package_name: Option<String>,

    #[validate(range(min = 0, message = "A quantidade mínima não pode ser negativa."))]
    #[serde(default)]
    pub minimum_quantity: i32,

    pub price: Option<Decimal>,

    pub drawer: Option<String>,
    pub division: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ComponentFields,

    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    #[serde(default)]
    pub initial_quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ComponentFields,
}
