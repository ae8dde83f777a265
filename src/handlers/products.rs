// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    db::NewProduct,
    models::inventory::Product,
    services::ProductUpdate,
};

// ---
// Validação customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Um reajuste de -100% ou mais deixaria preços negativos.
fn validate_adjustment_percent(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::NEGATIVE_ONE {
        let mut err = ValidationError::new("range");
        err.message = Some("O percentual de reajuste deve ser maior que -1.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,

    // Estoque inicial; depois da criação, só o ledger altera o saldo.
    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    #[serde(default)]
    pub quantity: i64,

    #[validate(range(min = 0, message = "A quantidade mínima não pode ser negativa."))]
    #[serde(default)]
    pub min_quantity: i64,

    #[validate(range(min = 0, message = "A quantidade máxima não pode ser negativa."))]
    #[serde(default)]
    pub max_quantity: i64,

    pub category_id: Option<Uuid>,
}

// ---
// Payload: UpdateProduct (sem `quantity`: o saldo é do ledger)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,

    #[validate(range(min = 0, message = "A quantidade mínima não pode ser negativa."))]
    #[serde(default)]
    pub min_quantity: i64,

    #[validate(range(min = 0, message = "A quantidade máxima não pode ser negativa."))]
    #[serde(default)]
    pub max_quantity: i64,

    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustmentPayload {
    #[validate(custom(function = "validate_adjustment_percent"))]
    pub percent: Decimal,
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Lista de produtos", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_products().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create_product(NewProduct {
            name: payload.name,
            unit_price: payload.unit_price,
            unit: payload.unit,
            quantity: payload.quantity,
            min_quantity: payload.min_quantity,
            max_quantity: payload.max_quantity,
            category_id: payload.category_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = UpdateProductPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update_product(
            id,
            ProductUpdate {
                name: payload.name,
                unit_price: payload.unit_price,
                unit: payload.unit,
                min_quantity: payload.min_quantity,
                max_quantity: payload.max_quantity,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/products/price-adjustment",
    tag = "Products",
    request_body = PriceAdjustmentPayload,
    responses(
        (status = 200, description = "Produtos reajustados", body = Vec<Product>),
        (status = 400, description = "Percentual inválido")
    )
)]
pub async fn adjust_prices(
    State(app_state): State<AppState>,
    Json(payload): Json<PriceAdjustmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let products = app_state
        .product_service
        .adjust_prices(payload.percent)
        .await?;
    Ok((StatusCode::OK, Json(products)))
}
