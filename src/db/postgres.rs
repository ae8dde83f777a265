// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryStore, NewCategory, NewMovement, NewProduct},
    models::inventory::{Category, Movement, Product},
};

// Os SELECTs de produto sempre resolvem o nome da categoria via JOIN,
// como o frontend espera.
const PRODUCT_COLUMNS: &str = r#"
    p.id, p.name, p.unit_price, p.unit, p.quantity, p.min_quantity,
    p.max_quantity, p.category_id, c.name AS category_name
"#;

const MOVEMENT_COLUMNS: &str = r#"
    m.id, m.product_id, p.name AS product_name, m.movement_date,
    m.quantity, m.kind, m.created_at
"#;

/// Backend PostgreSQL do contrato de armazenamento.
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             ORDER BY p.name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn insert_product(&self, data: NewProduct) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, unit_price, unit, quantity, min_quantity, max_quantity, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, unit_price, unit, quantity, min_quantity, max_quantity, category_id,
                      (SELECT c.name FROM categories c WHERE c.id = products.category_id) AS category_name
            "#,
        )
        .bind(&data.name)
        .bind(data.unit_price)
        .bind(&data.unit)
        .bind(data.quantity)
        .bind(data.min_quantity)
        .bind(data.max_quantity)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update_product(&self, product: Product) -> Result<Product, AppError> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, unit_price = $3, unit = $4, quantity = $5,
                min_quantity = $6, max_quantity = $7, category_id = $8
            WHERE id = $1
            RETURNING id, name, unit_price, unit, quantity, min_quantity, max_quantity, category_id,
                      (SELECT c.name FROM categories c WHERE c.id = products.category_id) AS category_name
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(&product.unit)
        .bind(product.quantity)
        .bind(product.min_quantity)
        .bind(product.max_quantity)
        .bind(product.category_id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(AppError::ProductNotFound(product.id))
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        // As movimentações do produto caem junto (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound(id));
        }
        Ok(())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, size_label, packaging FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, size_label, packaging FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn insert_category(&self, data: NewCategory) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, size_label, packaging)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, size_label, packaging
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.size_label)
        .bind(&data.packaging)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> Result<Category, AppError> {
        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, size_label = $4, packaging = $5
            WHERE id = $1
            RETURNING id, name, description, size_label, packaging
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.size_label)
        .bind(&category.packaging)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(AppError::CategoryNotFound(category.id))
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        // Produtos que apontavam para a categoria ficam sem categoria
        // (ON DELETE SET NULL), nunca com id pendurado.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn list_movements(&self) -> Result<Vec<Movement>, AppError> {
        let sql = format!(
            "SELECT {MOVEMENT_COLUMNS}
             FROM movements m
             JOIN products p ON p.id = m.product_id
             ORDER BY m.movement_date DESC, m.created_at DESC"
        );
        let movements = sqlx::query_as::<_, Movement>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(movements)
    }

    async fn movements_for_product(&self, product_id: Uuid) -> Result<Vec<Movement>, AppError> {
        let sql = format!(
            "SELECT {MOVEMENT_COLUMNS}
             FROM movements m
             JOIN products p ON p.id = m.product_id
             WHERE m.product_id = $1
             ORDER BY m.movement_date DESC, m.created_at DESC"
        );
        let movements = sqlx::query_as::<_, Movement>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(movements)
    }

    async fn apply_movement(
        &self,
        delta: i64,
        data: NewMovement,
    ) -> Result<(Product, Movement), AppError> {
        let mut tx = self.pool.begin().await?;

        // Relê o saldo sob lock de linha: serializa movimentações
        // concorrentes do mesmo produto sem bloquear os demais.
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1
             FOR UPDATE OF p"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(data.product_id)
            .fetch_optional(&mut *tx)
            .await?;
        let mut product = product.ok_or(AppError::ProductNotFound(data.product_id))?;

        let new_quantity = product.quantity + delta;
        if new_quantity < 0 {
            // O drop da transação faz rollback: nenhuma escrita fica visível.
            return Err(AppError::InsufficientStock {
                available: product.quantity,
                requested: data.quantity,
            });
        }

        sqlx::query("UPDATE products SET quantity = $2 WHERE id = $1")
            .bind(product.id)
            .bind(new_quantity)
            .execute(&mut *tx)
            .await?;

        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (product_id, movement_date, quantity, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, movement_date, quantity, kind, created_at,
                      (SELECT p.name FROM products p WHERE p.id = movements.product_id) AS product_name
            "#,
        )
        .bind(data.product_id)
        .bind(data.movement_date)
        .bind(data.quantity)
        .bind(data.kind)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        product.quantity = new_quantity;
        Ok((product, movement))
    }
}
