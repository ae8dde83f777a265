// src/services/alerts.rs

use crate::models::inventory::Product;

/// Colaborador de observabilidade do ledger.
///
/// Os avisos de limite são consultivos: nunca bloqueiam a operação nem
/// viram erro para o chamador. O ledger só notifica; o que fazer com o
/// aviso é decisão de quem implementa o trait.
pub trait StockAlerts: Send + Sync {
    fn below_minimum(&self, product: &Product);
    fn above_maximum(&self, product: &Product);
}

/// Implementação padrão: evento estruturado de warning via `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingStockAlerts;

impl StockAlerts for TracingStockAlerts {
    fn below_minimum(&self, product: &Product) {
        tracing::warn!(
            product_id = %product.id,
            product = %product.name,
            quantity = product.quantity,
            min_quantity = product.min_quantity,
            "Produto abaixo da quantidade mínima"
        );
    }

    fn above_maximum(&self, product: &Product) {
        tracing::warn!(
            product_id = %product.id,
            product = %product.name,
            quantity = product.quantity,
            max_quantity = product.max_quantity,
            "Produto acima da quantidade máxima"
        );
    }
}
