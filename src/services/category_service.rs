// src/services/category_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryStore, NewCategory},
    models::inventory::Category,
};

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn InventoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn create_category(&self, data: NewCategory) -> Result<Category, AppError> {
        self.store.insert_category(data).await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        data: NewCategory,
    ) -> Result<Category, AppError> {
        self.store
            .update_category(Category {
                id,
                name: data.name,
                description: data.description,
                size_label: data.size_label,
                packaging: data.packaging,
            })
            .await
    }

    /// Produtos que referenciavam a categoria ficam sem categoria
    /// (a referência é anulada, nunca deixada pendurada).
    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_category(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.store.list_categories().await
    }

    pub async fn find_category(&self, id: Uuid) -> Result<Category, AppError> {
        self.store
            .find_category(id)
            .await?
            .ok_or(AppError::CategoryNotFound(id))
    }
}
