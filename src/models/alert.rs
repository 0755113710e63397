// src/models/alert.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Alerta de Estoque Baixo ---
// Projeção derivada de (quantity_in_stock <= minimum_quantity).
// Não é fonte de verdade: pode ser apagado e recalculado a qualquer
// momento pelo AlertService.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: Uuid,
    pub component_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// Resumo de uma passada de reconciliação global.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSummary {
    pub created: usize,
    pub removed: usize,
}
