// src/handlers/movements.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{Movement, MovementType},
};

// ---
// Payload: RegisterMovement
// ---
// Data malformada e tipo desconhecido são rejeitados pelo serde antes de
// chegar aqui; a quantidade não-positiva é rejeitada duas vezes (payload
// e ledger).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMovementPayload {
    pub product_id: Uuid,

    pub kind: MovementType,

    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    pub quantity: i64,

    // Aceita como veio; não há validação de data futura.
    pub movement_date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub product_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    params(MovementFilter),
    responses(
        (status = 200, description = "Lista de movimentações", body = Vec<Movement>)
    )
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> Result<impl IntoResponse, AppError> {
    let movements = match filter.product_id {
        Some(product_id) => {
            app_state
                .movement_service
                .movements_for_product(product_id)
                .await?
        }
        None => app_state.movement_service.list_movements().await?,
    };
    Ok((StatusCode::OK, Json(movements)))
}

#[utoipa::path(
    post,
    path = "/api/movements",
    tag = "Movements",
    request_body = RegisterMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada", body = Movement),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Estoque insuficiente")
    )
)]
pub async fn register_movement(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .movement_service
        .register_movement(
            payload.product_id,
            payload.kind,
            payload.quantity,
            payload.movement_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}
