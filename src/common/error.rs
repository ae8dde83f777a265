use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhum erro é re-tentado automaticamente aqui: política de retry, se
// existir, pertence ao chamador.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    #[error("Categoria não encontrada: {0}")]
    CategoryNotFound(Uuid),

    // Quantidade de movimentação precisa ser um inteiro positivo.
    #[error("Quantidade inválida para movimentação: {0}")]
    InvalidQuantity(i64),

    // Rejeição de regra de negócio, não falha de sistema: a saída deixaria
    // o estoque negativo.
    #[error("Estoque insuficiente: disponível {available}, solicitado {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "Produto não encontrado."),
            AppError::CategoryNotFound(_) => (StatusCode::NOT_FOUND, "Categoria não encontrada."),
            AppError::InvalidQuantity(_) => (
                StatusCode::BAD_REQUEST,
                "A quantidade movimentada deve ser um inteiro positivo.",
            ),
            AppError::InsufficientStock { .. } => {
                (StatusCode::CONFLICT, "Estoque insuficiente para a operação.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
