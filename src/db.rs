pub mod memory;
pub mod postgres;

pub use memory::MemoryInventoryStore;
pub use postgres::PgInventoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Category, Movement, MovementType, Product},
};

// --- Dados de entrada (id é atribuído pelo armazenamento) ---

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: Decimal,
    pub unit: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub size_label: Option<String>,
    pub packaging: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_id: Uuid,
    pub movement_date: NaiveDate,
    pub quantity: i64,
    pub kind: MovementType,
}

/// Contrato de armazenamento do estoque.
///
/// Uma única capacidade abstrata, satisfeita por dois backends: o Postgres
/// ([`PgInventoryStore`]) e o em memória ([`MemoryInventoryStore`]), usado
/// pelos testes. Os serviços só conhecem este trait.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    // --- Produtos ---
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    /// Todos os produtos, com nome de categoria resolvido, ordenados por nome.
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    async fn insert_product(&self, data: NewProduct) -> Result<Product, AppError>;
    async fn update_product(&self, product: Product) -> Result<Product, AppError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), AppError>;

    // --- Categorias ---
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
    async fn insert_category(&self, data: NewCategory) -> Result<Category, AppError>;
    async fn update_category(&self, category: Category) -> Result<Category, AppError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), AppError>;

    // --- Movimentações ---
    /// Todas as movimentações, mais recentes primeiro.
    async fn list_movements(&self) -> Result<Vec<Movement>, AppError>;
    async fn movements_for_product(&self, product_id: Uuid) -> Result<Vec<Movement>, AppError>;

    /// Aplica `delta` ao saldo do produto e grava a movimentação, tudo ou
    /// nada: as duas escritas acontecem na mesma transação (ou sob o mesmo
    /// lock, no backend em memória), e o saldo é relido sob lock antes de
    /// validar a não-negatividade. Falha com [`AppError::ProductNotFound`]
    /// ou [`AppError::InsufficientStock`] sem deixar nenhuma escrita
    /// visível.
    async fn apply_movement(
        &self,
        delta: i64,
        data: NewMovement,
    ) -> Result<(Product, Movement), AppError>;
}
