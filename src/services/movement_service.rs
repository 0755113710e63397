// src/services/movement_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ComponentRepository, MovementRepository},
    models::movement::{
        BulkMovementItem, BulkMovementResult, FulfillmentStatus, MovementRequest,
        MovementType, PartialFulfillment, StockMovement,
    },
    services::AlertService,
};

// Aplica movimentações de Entrada/Saída ao saldo de um componente e
// registra cada uma no livro-razão imutável. Toda movimentação bem
// sucedida dispara a reconciliação de alerta do componente.
#[derive(Clone)]
pub struct MovementService {
    component_repo: Arc<dyn ComponentRepository>,
    movement_repo: Arc<dyn MovementRepository>,
    alert_service: AlertService,
}

impl MovementService {
    pub fn new(
        component_repo: Arc<dyn ComponentRepository>,
        movement_repo: Arc<dyn MovementRepository>,
        alert_service: AlertService,
    ) -> Self {
        Self {
            component_repo,
            movement_repo,
            alert_service,
        }
    }

    /// Aplica uma movimentação em modo estrito: Saída maior que o
    /// saldo é rejeitada com `InsufficientStock`, sem efeito parcial.
    pub async fn apply(
        &self,
        request: &MovementRequest,
        performed_by: Uuid,
    ) -> Result<StockMovement, AppError> {
        // Validação antes de qualquer mutação
        if request.quantity <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let mut component = self
            .component_repo
            .get(request.component_id)
            .await?
            .ok_or(AppError::ComponentNotFound)?;

        let now = Utc::now();
        let quantity_changed = match request.movement_type {
            MovementType::Entrada => {
                component.quantity_in_stock += request.quantity;
                component.last_entry_at = Some(now);
                request.quantity
            }
            MovementType::Saida => {
                if request.quantity > component.quantity_in_stock {
                    return Err(AppError::InsufficientStock {
                        available: component.quantity_in_stock,
                        requested: request.quantity,
                    });
                }
                component.quantity_in_stock -= request.quantity;
                component.last_exit_at = Some(now);
                -request.quantity
            }
        };
        component.updated_at = now;

        self.component_repo.update(&component).await?;

        let movement = StockMovement {
            id: Uuid::new_v4(),
            component_id: component.id,
            movement_type: request.movement_type,
            quantity_changed,
            performed_by,
            created_at: now,
        };
        self.movement_repo.insert(&movement).await?;

        // Alerta é projeção do saldo: reconcilia após cada movimento.
        self.alert_service.reconcile_one(component.id).await?;

        tracing::info!(
            "📦 Movimentação aplicada: componente '{}', {:?} de {} (saldo {})",
            component.name,
            request.movement_type,
            request.quantity,
            component.quantity_in_stock
        );
        Ok(movement)
    }

    /// Modo em lote: aplica cada item de forma independente, na ordem
    /// recebida. Falha de um item não desfaz os sucessos anteriores;
    /// os erros são acumulados no resultado.
    pub async fn apply_bulk(
        &self,
        requests: &[MovementRequest],
        performed_by: Uuid,
    ) -> Result<BulkMovementResult, AppError> {
        let mut items = Vec::with_capacity(requests.len());
        let mut success_count = 0;
        let mut error_count = 0;

        for request in requests {
            match self.apply(request, performed_by).await {
                Ok(movement) => {
                    success_count += 1;
                    items.push(BulkMovementItem {
                        component_id: request.component_id,
                        movement_id: Some(movement.id),
                        error: None,
                    });
                }
                Err(e) => {
                    error_count += 1;
                    items.push(BulkMovementItem {
                        component_id: request.component_id,
                        movement_id: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        tracing::info!(
            "📦 Lote processado: {} sucesso(s), {} erro(s)",
            success_count,
            error_count
        );
        Ok(BulkMovementResult {
            success_count,
            error_count,
            items,
        })
    }

    /// Modo de atendimento parcial: uma Saída maior que o saldo é
    /// atendida até o disponível, com o déficit reportado no status.
    /// Entradas são sempre atendidas por inteiro.
    pub async fn apply_partial(
        &self,
        requests: &[MovementRequest],
        performed_by: Uuid,
    ) -> Result<Vec<PartialFulfillment>, AppError> {
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let available = match self.component_repo.get(request.component_id).await? {
                Some(c) => c.quantity_in_stock,
                None => {
                    results.push(PartialFulfillment {
                        component_id: request.component_id,
                        status: FulfillmentStatus::Unavailable,
                        requested: request.quantity,
                        processed: 0,
                        available: 0,
                    });
                    continue;
                }
            };

            if request.quantity <= 0 {
                results.push(PartialFulfillment {
                    component_id: request.component_id,
                    status: FulfillmentStatus::Unavailable,
                    requested: request.quantity,
                    processed: 0,
                    available,
                });
                continue;
            }

            let to_process = match request.movement_type {
                MovementType::Entrada => request.quantity,
                MovementType::Saida => request.quantity.min(available),
            };

            if to_process == 0 {
                results.push(PartialFulfillment {
                    component_id: request.component_id,
                    status: FulfillmentStatus::Unavailable,
                    requested: request.quantity,
                    processed: 0,
                    available,
                });
                continue;
            }

            let clamped = MovementRequest {
                component_id: request.component_id,
                movement_type: request.movement_type,
                quantity: to_process,
            };
            self.apply(&clamped, performed_by).await?;

            let status = if to_process == request.quantity {
                FulfillmentStatus::Full
            } else {
                FulfillmentStatus::Partial
            };
            results.push(PartialFulfillment {
                component_id: request.component_id,
                status,
                requested: request.quantity,
                processed: to_process,
                available,
            });
        }

        Ok(results)
    }

    pub async fn history(&self, component_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.movement_repo.list_by_component(component_id).await
    }

    pub async fn list(&self) -> Result<Vec<StockMovement>, AppError> {
        self.movement_repo.list().await
    }
}
