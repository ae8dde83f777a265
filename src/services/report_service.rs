// src/services/report_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::inventory::{MovementSummary, MovementType, Product, StockBalanceEntry},
};

/// Rótulo dos produtos sem categoria no relatório de contagem.
pub const NO_CATEGORY_LABEL: &str = "Sem categoria";

/// O Report Engine: agregações puras sobre produtos e movimentações.
/// Nenhuma operação aqui altera estado.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn InventoryStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// 1) Lista de preços com nome de categoria resolvido, ordenada por nome.
    pub async fn price_list(&self) -> Result<Vec<Product>, AppError> {
        self.store.list_products().await
    }

    /// 2) Balanço físico/financeiro: cada produto com seu valor total
    /// (`preço unitário * saldo`), em aritmética decimal exata.
    pub async fn stock_balance(&self) -> Result<Vec<StockBalanceEntry>, AppError> {
        let products = self.store.list_products().await?;
        Ok(products
            .into_iter()
            .map(|product| {
                let total_value = product.unit_price * Decimal::from(product.quantity);
                StockBalanceEntry { product, total_value }
            })
            .collect())
    }

    /// 3) Produtos abaixo da quantidade mínima, ordenados por nome.
    /// Lista vazia é resultado válido, não erro.
    pub async fn below_minimum(&self) -> Result<Vec<Product>, AppError> {
        let mut products: Vec<Product> = self
            .store
            .list_products()
            .await?
            .into_iter()
            .filter(|p| p.quantity < p.min_quantity)
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// 4) Quantidade de produtos por categoria; sem categoria entra em
    /// [`NO_CATEGORY_LABEL`].
    pub async fn count_by_category(&self) -> Result<BTreeMap<String, i64>, AppError> {
        let products = self.store.list_products().await?;
        let mut counts = BTreeMap::new();
        for product in products {
            let label = product
                .category_name
                .unwrap_or_else(|| NO_CATEGORY_LABEL.to_string());
            *counts.entry(label).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// 5) Produto com maior entrada e maior saída acumuladas, selecionados
    /// de forma independente (podem ser o mesmo produto). Empate decidido
    /// pelo menor id de produto, para um resultado determinístico. Um lado
    /// sem movimentações reporta produto nulo e total zero.
    pub async fn top_movers(&self) -> Result<MovementSummary, AppError> {
        let movements = self.store.list_movements().await?;

        let mut inbound_totals: HashMap<Uuid, i64> = HashMap::new();
        let mut outbound_totals: HashMap<Uuid, i64> = HashMap::new();
        for movement in &movements {
            let totals = match movement.kind {
                MovementType::Inbound => &mut inbound_totals,
                MovementType::Outbound => &mut outbound_totals,
            };
            *totals.entry(movement.product_id).or_insert(0) += movement.quantity;
        }

        let (top_inbound, inbound_total) = self.resolve_top(&inbound_totals).await?;
        let (top_outbound, outbound_total) = self.resolve_top(&outbound_totals).await?;

        Ok(MovementSummary {
            top_inbound,
            inbound_total,
            top_outbound,
            outbound_total,
        })
    }

    /// Valor total do estoque: Σ preço unitário * saldo, sobre todos os
    /// produtos. Conjunto vazio soma zero.
    pub async fn total_inventory_value(&self) -> Result<Decimal, AppError> {
        let products = self.store.list_products().await?;
        Ok(products
            .iter()
            .map(|p| p.unit_price * Decimal::from(p.quantity))
            .fold(Decimal::ZERO, |acc, value| acc + value))
    }

    async fn resolve_top(
        &self,
        totals: &HashMap<Uuid, i64>,
    ) -> Result<(Option<Product>, i64), AppError> {
        let best = totals.iter().max_by(|(id_a, total_a), (id_b, total_b)| {
            // Maior total vence; empate fica com o menor id.
            total_a.cmp(total_b).then_with(|| id_b.cmp(id_a))
        });

        match best {
            Some((&product_id, &total)) => {
                Ok((self.store.find_product(product_id).await?, total))
            }
            None => Ok((None, 0)),
        }
    }
}
