// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- PRODUTOS ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::adjust_prices,

        // --- CATEGORIAS ---
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- MOVIMENTAÇÕES ---
        handlers::movements::list_movements,
        handlers::movements::register_movement,

        // --- RELATÓRIOS ---
        handlers::reports::price_list,
        handlers::reports::stock_balance,
        handlers::reports::below_minimum,
        handlers::reports::count_by_category,
        handlers::reports::top_movers,
    ),
    components(
        schemas(
            models::inventory::Category,
            models::inventory::Product,
            models::inventory::Movement,
            models::inventory::MovementType,
            models::inventory::MovementSummary,
            models::inventory::StockBalanceEntry,
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::products::PriceAdjustmentPayload,
            handlers::categories::CategoryPayload,
            handlers::movements::RegisterMovementPayload,
            handlers::reports::StockBalanceResponse,
        )
    ),
    tags(
        (name = "Products", description = "Catálogo de produtos"),
        (name = "Categories", description = "Categorias de produtos"),
        (name = "Movements", description = "Livro-razão de movimentações de estoque"),
        (name = "Reports", description = "Relatórios derivados do estoque e do livro-razão")
    )
)]
pub struct ApiDoc;
