// src/handlers/reports.rs

use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{MovementSummary, Product, StockBalanceEntry},
};

/// Balanço físico/financeiro: as linhas por produto e o valor total do
/// estoque somado em aritmética decimal exata.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockBalanceResponse {
    pub items: Vec<StockBalanceEntry>,
    pub total_value: Decimal,
}

#[utoipa::path(
    get,
    path = "/api/reports/price-list",
    tag = "Reports",
    responses(
        (status = 200, description = "Lista de preços com categoria", body = Vec<Product>)
    )
)]
pub async fn price_list(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = app_state.report_service.price_list().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/reports/stock-balance",
    tag = "Reports",
    responses(
        (status = 200, description = "Balanço físico/financeiro", body = StockBalanceResponse)
    )
)]
pub async fn stock_balance(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.report_service.stock_balance().await?;
    let total_value = app_state.report_service.total_inventory_value().await?;
    Ok((StatusCode::OK, Json(StockBalanceResponse { items, total_value })))
}

#[utoipa::path(
    get,
    path = "/api/reports/below-minimum",
    tag = "Reports",
    responses(
        (status = 200, description = "Produtos abaixo da quantidade mínima", body = Vec<Product>)
    )
)]
pub async fn below_minimum(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.report_service.below_minimum().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/reports/count-by-category",
    tag = "Reports",
    responses(
        (status = 200, description = "Quantidade de produtos por categoria")
    )
)]
pub async fn count_by_category(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let counts: BTreeMap<String, i64> = app_state.report_service.count_by_category().await?;
    Ok((StatusCode::OK, Json(counts)))
}

#[utoipa::path(
    get,
    path = "/api/reports/top-movers",
    tag = "Reports",
    responses(
        (status = 200, description = "Produto com maior entrada e maior saída", body = MovementSummary)
    )
)]
pub async fn top_movers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.report_service.top_movers().await?;
    Ok((StatusCode::OK, Json(summary)))
}
