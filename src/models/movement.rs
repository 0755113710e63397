// src/models/movement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Tipo da movimentação. No banco vira o enum 'movement_type'.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entrada,
    Saida,
}

// --- Movimentação de Estoque (livro-razão) ---
// Imutável depois de criada: nunca sofre UPDATE nem DELETE.
// `quantity_changed` é assinado: positivo para Entrada, negativo para Saída.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub component_id: Uuid,
    pub movement_type: MovementType,
    pub quantity_changed: i32,
    pub performed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// Pedido de movimentação, item a item. Usado tanto na aplicação
// unitária quanto nos modos em lote e de atendimento parcial.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub component_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
}

// --- Resultado do modo em lote ---
// Cada item é aplicado de forma independente; sucessos anteriores não
// são desfeitos quando um item posterior falha.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMovementItem {
    pub component_id: Uuid,
    pub movement_id: Option<Uuid>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMovementResult {
    pub success_count: usize,
    pub error_count: usize,
    pub items: Vec<BulkMovementItem>,
}

// --- Resultado do modo de atendimento parcial ---
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    Full,
    Partial,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFulfillment {
    pub component_id: Uuid,
    pub status: FulfillmentStatus,
    pub requested: i32,
    pub processed: i32,
    pub available: i32,
}
