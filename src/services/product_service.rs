// src/services/product_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryStore, NewProduct},
    models::inventory::Product,
};

/// Campos editáveis de um produto. O saldo fica de fora de propósito:
/// só o ledger mexe em `quantity`.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub unit_price: Decimal,
    pub unit: String,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub category_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn InventoryStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    // CRUD
    pub async fn create_product(&self, data: NewProduct) -> Result<Product, AppError> {
        if let Some(category_id) = data.category_id {
            self.ensure_category_exists(category_id).await?;
        }
        self.store.insert_product(data).await
    }

    /// Edição administrativa: preserva o saldo atual do produto.
    pub async fn update_product(&self, id: Uuid, data: ProductUpdate) -> Result<Product, AppError> {
        let current = self
            .store
            .find_product(id)
            .await?
            .ok_or(AppError::ProductNotFound(id))?;

        if let Some(category_id) = data.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        self.store
            .update_product(Product {
                id,
                name: data.name,
                unit_price: data.unit_price,
                unit: data.unit,
                quantity: current.quantity,
                min_quantity: data.min_quantity,
                max_quantity: data.max_quantity,
                category_id: data.category_id,
                category_name: None,
            })
            .await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_product(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.store.list_products().await
    }

    pub async fn find_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.store
            .find_product(id)
            .await?
            .ok_or(AppError::ProductNotFound(id))
    }

    /// Reajusta o preço de todos os produtos em um percentual
    /// (ex: 0.10 = +10%, -0.05 = -5%).
    pub async fn adjust_prices(&self, percent: Decimal) -> Result<Vec<Product>, AppError> {
        let mut adjusted = Vec::new();
        for mut product in self.store.list_products().await? {
            product.unit_price *= Decimal::ONE + percent;
            adjusted.push(self.store.update_product(product).await?);
        }
        Ok(adjusted)
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> Result<(), AppError> {
        self.store
            .find_category(category_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::CategoryNotFound(category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryInventoryStore, NewCategory, NewMovement};
    use crate::models::inventory::MovementType;
    use chrono::NaiveDate;

    fn service() -> (MemoryInventoryStore, ProductService) {
        let store = MemoryInventoryStore::new();
        (store.clone(), ProductService::new(Arc::new(store)))
    }

    fn new_product(name: &str, price: Decimal) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            unit_price: price,
            unit: "UN".to_string(),
            quantity: 10,
            min_quantity: 0,
            max_quantity: 100,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let (_, service) = service();
        let mut data = new_product("Café", Decimal::TEN);
        data.category_id = Some(Uuid::new_v4());

        let err = service.create_product(data).await.unwrap_err();
        assert!(matches!(err, AppError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn update_preserves_ledger_owned_quantity() {
        let (store, service) = service();
        let product = service
            .create_product(new_product("Café", Decimal::TEN))
            .await
            .unwrap();

        // O ledger movimenta o saldo por fora da edição administrativa.
        store
            .apply_movement(
                5,
                NewMovement {
                    product_id: product.id,
                    movement_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    quantity: 5,
                    kind: MovementType::Inbound,
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_product(
                product.id,
                ProductUpdate {
                    name: "Café torrado".to_string(),
                    unit_price: Decimal::new(1250, 2),
                    unit: "KG".to_string(),
                    min_quantity: 2,
                    max_quantity: 50,
                    category_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Café torrado");
        assert_eq!(updated.quantity, 15);
    }

    #[tokio::test]
    async fn adjust_prices_applies_percentage_to_all_products() {
        let (_, service) = service();
        service
            .create_product(new_product("A", Decimal::new(1000, 2)))
            .await
            .unwrap();
        service
            .create_product(new_product("B", Decimal::new(500, 2)))
            .await
            .unwrap();

        let adjusted = service.adjust_prices(Decimal::new(10, 2)).await.unwrap();

        let mut prices: Vec<Decimal> = adjusted.iter().map(|p| p.unit_price).collect();
        prices.sort();
        assert_eq!(prices, vec![Decimal::new(550, 2), Decimal::new(1100, 2)]);
    }

    #[tokio::test]
    async fn category_name_is_resolved_on_read() {
        let (store, service) = service();
        let category = store
            .insert_category(NewCategory {
                name: "Bebidas".to_string(),
                description: None,
                size_label: None,
                packaging: None,
            })
            .await
            .unwrap();

        let mut data = new_product("Suco", Decimal::TEN);
        data.category_id = Some(category.id);
        let product = service.create_product(data).await.unwrap();

        assert_eq!(product.category_name.as_deref(), Some("Bebidas"));
        let listed = service.list_products().await.unwrap();
        assert_eq!(listed[0].category_name.as_deref(), Some("Bebidas"));
    }
}
