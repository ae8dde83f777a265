pub mod categories;
pub mod movements;
pub mod products;
pub mod reports;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc};

/// Monta o router da API. Fica na biblioteca (e não no `main`) para os
/// testes de integração conseguirem exercitar as rotas sem abrir socket.
pub fn api_router(state: AppState) -> Router {
    let product_routes = Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route(
            "/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/price-adjustment", post(products::adjust_prices));

    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        );

    let movement_routes = Router::new().route(
        "/",
        get(movements::list_movements).post(movements::register_movement),
    );

    let report_routes = Router::new()
        .route("/price-list", get(reports::price_list))
        .route("/stock-balance", get(reports::stock_balance))
        .route("/below-minimum", get(reports::below_minimum))
        .route("/count-by-category", get(reports::count_by_category))
        .route("/top-movers", get(reports::top_movers));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/products", product_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/movements", movement_routes)
        .nest("/api/reports", report_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // O frontend consome a API de outra origem.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
