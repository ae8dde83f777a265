// src/db/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryStore, NewCategory, NewMovement, NewProduct},
    models::inventory::{Category, Movement, Product},
};

#[derive(Debug, Default)]
struct MemoryState {
    products: HashMap<Uuid, Product>,
    categories: HashMap<Uuid, Category>,
    movements: Vec<Movement>,
}

impl MemoryState {
    // Nome da categoria é resolvido na leitura, como o JOIN do Postgres.
    fn resolved(&self, product: &Product) -> Product {
        let mut p = product.clone();
        p.category_name = p
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(|c| c.name.clone());
        p
    }
}

/// Backend em memória do contrato de armazenamento.
///
/// O mutex único serializa as operações de mutação por produto (e entre
/// produtos, o que é mais forte do que o contrato exige). Usado pelos
/// testes e como dublê do backend durável.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let state = self.lock();
        Ok(state.products.get(&id).map(|p| state.resolved(p)))
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let state = self.lock();
        let mut products: Vec<Product> =
            state.products.values().map(|p| state.resolved(p)).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn insert_product(&self, data: NewProduct) -> Result<Product, AppError> {
        let mut state = self.lock();
        let product = Product {
            id: Uuid::new_v4(),
            name: data.name,
            unit_price: data.unit_price,
            unit: data.unit,
            quantity: data.quantity,
            min_quantity: data.min_quantity,
            max_quantity: data.max_quantity,
            category_id: data.category_id,
            category_name: None,
        };
        state.products.insert(product.id, product.clone());
        Ok(state.resolved(&product))
    }

    async fn update_product(&self, product: Product) -> Result<Product, AppError> {
        let mut state = self.lock();
        if !state.products.contains_key(&product.id) {
            return Err(AppError::ProductNotFound(product.id));
        }
        state.products.insert(product.id, product.clone());
        Ok(state.resolved(&product))
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let mut state = self.lock();
        if state.products.remove(&id).is_none() {
            return Err(AppError::ProductNotFound(id));
        }
        // Mesmo comportamento do ON DELETE CASCADE.
        state.movements.retain(|m| m.product_id != id);
        Ok(())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.lock().categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let mut categories: Vec<Category> = self.lock().categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert_category(&self, data: NewCategory) -> Result<Category, AppError> {
        let mut state = self.lock();
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            size_label: data.size_label,
            packaging: data.packaging,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> Result<Category, AppError> {
        let mut state = self.lock();
        if !state.categories.contains_key(&category.id) {
            return Err(AppError::CategoryNotFound(category.id));
        }
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let mut state = self.lock();
        if state.categories.remove(&id).is_none() {
            return Err(AppError::CategoryNotFound(id));
        }
        // Mesmo comportamento do ON DELETE SET NULL.
        for product in state.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    async fn list_movements(&self) -> Result<Vec<Movement>, AppError> {
        let mut movements = self.lock().movements.clone();
        movements.sort_by(|a, b| {
            b.movement_date
                .cmp(&a.movement_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(movements)
    }

    async fn movements_for_product(&self, product_id: Uuid) -> Result<Vec<Movement>, AppError> {
        let mut movements: Vec<Movement> = self
            .lock()
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect();
        movements.sort_by(|a, b| {
            b.movement_date
                .cmp(&a.movement_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(movements)
    }

    async fn apply_movement(
        &self,
        delta: i64,
        data: NewMovement,
    ) -> Result<(Product, Movement), AppError> {
        let mut state = self.lock();

        let current = state
            .products
            .get(&data.product_id)
            .ok_or(AppError::ProductNotFound(data.product_id))?;

        let new_quantity = current.quantity + delta;
        if new_quantity < 0 {
            // Nenhuma das duas escritas aconteceu ainda: tudo ou nada.
            return Err(AppError::InsufficientStock {
                available: current.quantity,
                requested: data.quantity,
            });
        }

        let movement = Movement {
            id: Uuid::new_v4(),
            product_id: data.product_id,
            product_name: current.name.clone(),
            movement_date: data.movement_date,
            quantity: data.quantity,
            kind: data.kind,
            created_at: Utc::now(),
        };

        if let Some(product) = state.products.get_mut(&data.product_id) {
            product.quantity = new_quantity;
        }
        state.movements.push(movement.clone());

        let product = state
            .products
            .get(&data.product_id)
            .map(|p| state.resolved(p))
            .ok_or(AppError::ProductNotFound(data.product_id))?;

        Ok((product, movement))
    }
}
