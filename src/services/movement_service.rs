// src/services/movement_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryStore, NewMovement},
    models::inventory::{Movement, MovementType},
    services::alerts::StockAlerts,
};

/// O Stock Ledger: toda alteração de saldo nasce de uma movimentação
/// registrada aqui. O saldo do produto é um cache do efeito líquido do
/// histórico; esta é a única porta de mutação.
#[derive(Clone)]
pub struct MovementService {
    store: Arc<dyn InventoryStore>,
    alerts: Arc<dyn StockAlerts>,
}

impl MovementService {
    pub fn new(store: Arc<dyn InventoryStore>, alerts: Arc<dyn StockAlerts>) -> Self {
        Self { store, alerts }
    }

    /// Registra uma nova movimentação e atualiza o estoque do produto.
    ///
    /// A data é aceita como veio (sem validação de futuro). Não há
    /// deduplicação: a mesma movimentação lógica enviada duas vezes gera
    /// dois registros e aplica o delta duas vezes.
    pub async fn register_movement(
        &self,
        product_id: Uuid,
        kind: MovementType,
        quantity: i64,
        movement_date: NaiveDate,
    ) -> Result<Movement, AppError> {
        if quantity <= 0 {
            return Err(AppError::InvalidQuantity(quantity));
        }

        let delta = match kind {
            MovementType::Inbound => quantity,
            MovementType::Outbound => -quantity,
        };

        // As duas escritas (saldo novo + registro da movimentação) são
        // atômicas no armazenamento; em caso de falha nada fica visível.
        let (product, movement) = self
            .store
            .apply_movement(
                delta,
                NewMovement {
                    product_id,
                    movement_date,
                    quantity,
                    kind,
                },
            )
            .await?;

        if product.quantity < product.min_quantity {
            self.alerts.below_minimum(&product);
        }
        if product.quantity > product.max_quantity {
            self.alerts.above_maximum(&product);
        }

        Ok(movement)
    }

    /// Lista todas as movimentações, mais recentes primeiro.
    pub async fn list_movements(&self) -> Result<Vec<Movement>, AppError> {
        self.store.list_movements().await
    }

    /// Movimentações de um produto específico.
    pub async fn movements_for_product(&self, product_id: Uuid) -> Result<Vec<Movement>, AppError> {
        self.store.movements_for_product(product_id).await
    }
}
