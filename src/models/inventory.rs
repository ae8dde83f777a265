// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    // Atributos de tamanho/embalagem (ex: "500g", "caixa com 12")
    pub size_label: Option<String>,
    pub packaging: Option<String>,
}

// --- 2. Produtos ---
// `quantity` é um cache: a fonte da verdade é o livro-razão de movimentações.
// Só o ledger altera esse campo; a edição administrativa preserva o valor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub unit: String, // ex: KG, UN, L
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub category_id: Option<Uuid>,
    // Nome da categoria resolvido na leitura (JOIN), para exibição.
    pub category_name: Option<String>,
}

// --- 3. Tipo de Movimentação ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum MovementType {
    Inbound,  // Vira "INBOUND"
    Outbound, // Vira "OUTBOUND"
}

// --- 4. Movimentações (o livro-razão) ---
// Imutável depois de criada: corrigir um erro exige uma movimentação
// compensatória, nunca edição ou remoção.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub movement_date: NaiveDate,
    pub quantity: i64,
    pub kind: MovementType,
    pub created_at: DateTime<Utc>,
}

// --- 5. DTOs de relatório (derivados, nunca persistidos) ---

/// Produto campeão de entrada e de saída, com os totais acumulados.
/// Um lado sem movimentações reporta produto nulo e total zero.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementSummary {
    pub top_inbound: Option<Product>,
    pub inbound_total: i64,
    pub top_outbound: Option<Product>,
    pub outbound_total: i64,
}

/// Linha do balanço físico/financeiro: produto + valor total em estoque.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockBalanceEntry {
    pub product: Product,
    pub total_value: Decimal,
}
