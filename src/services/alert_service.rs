// src/services/alert_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AlertRepository, ComponentRepository},
    models::{
        alert::{ReconcileSummary, StockAlert},
        component::Component,
    },
};

// Mantém os alertas de estoque baixo como projeção derivada do saldo:
// alerta existe se, e somente se, quantity_in_stock <= minimum_quantity.
#[derive(Clone)]
pub struct AlertService {
    component_repo: Arc<dyn ComponentRepository>,
    alert_repo: Arc<dyn AlertRepository>,
}

impl AlertService {
    pub fn new(
        component_repo: Arc<dyn ComponentRepository>,
        alert_repo: Arc<dyn AlertRepository>,
    ) -> Self {
        Self {
            component_repo,
            alert_repo,
        }
    }

    fn build_message(component: &Component) -> String {
        format!(
            "Estoque baixo: {} com {} unidade(s) (mínimo {})",
            component.name, component.quantity_in_stock, component.minimum_quantity
        )
    }

    fn is_below_threshold(component: &Component) -> bool {
        component.quantity_in_stock <= component.minimum_quantity
    }

    /// Reconcilia o alerta de um componente com o saldo atual.
    /// Idempotente: reaplicar com o estoque inalterado não gera
    /// nenhuma escrita.
    pub async fn reconcile_one(&self, component_id: Uuid) -> Result<(), AppError> {
        let component = self
            .component_repo
            .get(component_id)
            .await?
            .ok_or(AppError::ComponentNotFound)?;
        self.reconcile(&component).await?;
        Ok(())
    }

    async fn reconcile(&self, component: &Component) -> Result<ReconcileChange, AppError> {
        let existing = self.alert_repo.find_by_component(component.id).await?;

        match (Self::is_below_threshold(component), existing) {
            (true, None) => {
                let alert = StockAlert {
                    id: Uuid::new_v4(),
                    component_id: component.id,
                    message: Self::build_message(component),
                    created_at: Utc::now(),
                };
                self.alert_repo.insert(&alert).await?;
                tracing::info!("⚠️ Alerta criado para o componente '{}'", component.name);
                Ok(ReconcileChange::Created)
            }
            (false, Some(_)) => {
                self.alert_repo.delete_by_component(component.id).await?;
                tracing::info!("✅ Alerta removido para o componente '{}'", component.name);
                Ok(ReconcileChange::Removed)
            }
            // Já consistente: nada a escrever.
            _ => Ok(ReconcileChange::None),
        }
    }

    /// Passa `reconcile_one` sobre todos os componentes. Pensado para
    /// correção periódica de divergências.
    pub async fn reconcile_all(&self) -> Result<ReconcileSummary, AppError> {
        let components = self.component_repo.list().await?;
        let mut summary = ReconcileSummary::default();

        for component in &components {
            match self.reconcile(component).await? {
                ReconcileChange::Created => summary.created += 1,
                ReconcileChange::Removed => summary.removed += 1,
                ReconcileChange::None => {}
            }
        }

        tracing::info!(
            "🔄 Reconciliação global: {} alerta(s) criado(s), {} removido(s)",
            summary.created,
            summary.removed
        );
        Ok(summary)
    }

    /// Cria alertas para componentes abaixo do mínimo que ainda não
    /// têm um. Ao contrário de `reconcile_all`, nunca remove alertas
    /// que deixaram de se qualificar (operação assimétrica).
    pub async fn generate_missing(&self) -> Result<usize, AppError> {
        let components = self.component_repo.list().await?;
        let mut created = 0;

        for component in &components {
            if !Self::is_below_threshold(component) {
                continue;
            }
            if self.alert_repo.find_by_component(component.id).await?.is_some() {
                continue;
            }
            let alert = StockAlert {
                id: Uuid::new_v4(),
                component_id: component.id,
                message: Self::build_message(component),
                created_at: Utc::now(),
            };
            self.alert_repo.insert(&alert).await?;
            created += 1;
        }

        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<StockAlert>, AppError> {
        self.alert_repo.list().await
    }
}

enum ReconcileChange {
    Created,
    Removed,
    None,
}
