//! Testes de integração da API HTTP.
//!
//! Sobem o router real sobre o backend em memória, sem socket e sem
//! banco: o contrato de armazenamento é o mesmo do Postgres.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use estoque_backend::{
    config::AppState, db::MemoryInventoryStore, handlers, services::TracingStockAlerts,
};
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let store = MemoryInventoryStore::new();
    let state = AppState::with_store(Arc::new(store), Arc::new(TracingStockAlerts));
    TestServer::new(handlers::api_router(state)).unwrap()
}

async fn create_category(server: &TestServer, name: &str) -> Value {
    let response = server
        .post("/api/categories")
        .json(&json!({ "name": name, "description": "teste" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn create_product(server: &TestServer, name: &str, quantity: i64) -> Value {
    let response = server
        .post("/api/products")
        .json(&json!({
            "name": name,
            "unitPrice": 10.5,
            "unit": "UN",
            "quantity": quantity,
            "minQuantity": 5,
            "maxQuantity": 100
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn product_quantity(server: &TestServer, id: &str) -> i64 {
    let products = server.get("/api/products").await.json::<Value>();
    products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
        .unwrap()["quantity"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let server = test_server();
    let response = server.get("/api/health").await;
    response.assert_status(StatusCode::OK);
    response.assert_text("OK");
}

#[tokio::test]
async fn product_is_created_with_resolved_category_name() {
    let server = test_server();
    let category = create_category(&server, "Bebidas").await;

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Suco de uva",
            "unitPrice": 8.9,
            "unit": "L",
            "quantity": 12,
            "minQuantity": 2,
            "maxQuantity": 40,
            "categoryId": category["id"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let product = response.json::<Value>();
    assert_eq!(product["categoryName"], "Bebidas");
}

#[tokio::test]
async fn product_with_unknown_category_is_not_found() {
    let server = test_server();

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Suco",
            "unitPrice": 8.9,
            "unit": "L",
            "categoryId": "00000000-0000-0000-0000-000000000001"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_product_name_is_rejected_with_details() {
    let server = test_server();

    let response = server
        .post("/api/products")
        .json(&json!({ "name": "", "unitPrice": 1.0, "unit": "UN" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn movement_lifecycle_updates_the_cached_quantity() {
    let server = test_server();
    let product = create_product(&server, "Produto A", 10).await;
    let id = product["id"].as_str().unwrap().to_string();

    // Saída de 3: saldo cai para 7.
    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": id,
            "kind": "OUTBOUND",
            "quantity": 3,
            "movementDate": "2025-06-15"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let movement = response.json::<Value>();
    assert_eq!(movement["productName"], "Produto A");
    assert_eq!(product_quantity(&server, &id).await, 7);

    // Saída de 10: recusada, saldo intacto, nada registrado a mais.
    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": id,
            "kind": "OUTBOUND",
            "quantity": 10,
            "movementDate": "2025-06-16"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(product_quantity(&server, &id).await, 7);

    // Entrada de 200: saldo 207 (estourar o máximo é só aviso, nunca erro).
    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": id,
            "kind": "INBOUND",
            "quantity": 200,
            "movementDate": "2025-06-17"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(product_quantity(&server, &id).await, 207);

    let movements = server.get("/api/movements").await.json::<Value>();
    assert_eq!(movements.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn movements_can_be_filtered_by_product() {
    let server = test_server();
    let a = create_product(&server, "A", 10).await;
    let b = create_product(&server, "B", 10).await;

    for (product, quantity) in [(&a, 1), (&b, 2), (&b, 3)] {
        server
            .post("/api/movements")
            .json(&json!({
                "productId": product["id"],
                "kind": "INBOUND",
                "quantity": quantity,
                "movementDate": "2025-06-15"
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let url = format!("/api/movements?productId={}", b["id"].as_str().unwrap());
    let filtered = server.get(&url).await.json::<Value>();
    assert_eq!(filtered.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_positive_movement_quantity_is_rejected() {
    let server = test_server();
    let product = create_product(&server, "Produto A", 10).await;

    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": product["id"],
            "kind": "INBOUND",
            "quantity": 0,
            "movementDate": "2025-06-15"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let movements = server.get("/api/movements").await.json::<Value>();
    assert!(movements.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_movement_kind_never_reaches_the_ledger() {
    let server = test_server();
    let product = create_product(&server, "Produto A", 10).await;

    // Tipo desconhecido é barrado na desserialização.
    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": product["id"],
            "kind": "SIDEWAYS",
            "quantity": 1,
            "movementDate": "2025-06-15"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let movements = server.get("/api/movements").await.json::<Value>();
    assert!(movements.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn movement_for_unknown_product_is_not_found() {
    let server = test_server();

    let response = server
        .post("/api/movements")
        .json(&json!({
            "productId": "00000000-0000-0000-0000-000000000001",
            "kind": "INBOUND",
            "quantity": 1,
            "movementDate": "2025-06-15"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_cannot_touch_the_ledger_owned_quantity() {
    let server = test_server();
    let product = create_product(&server, "Produto A", 10).await;
    let id = product["id"].as_str().unwrap().to_string();

    server
        .post("/api/movements")
        .json(&json!({
            "productId": id,
            "kind": "INBOUND",
            "quantity": 5,
            "movementDate": "2025-06-15"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // O payload de edição nem tem campo de saldo.
    let response = server
        .put(&format!("/api/products/{id}"))
        .json(&json!({
            "name": "Produto A renomeado",
            "unitPrice": 12.0,
            "unit": "KG",
            "minQuantity": 1,
            "maxQuantity": 50
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let updated = response.json::<Value>();
    assert_eq!(updated["name"], "Produto A renomeado");
    assert_eq!(updated["quantity"], 15);
}

#[tokio::test]
async fn deleting_a_product_removes_its_movement_history() {
    let server = test_server();
    let product = create_product(&server, "Produto A", 10).await;
    let id = product["id"].as_str().unwrap().to_string();

    server
        .post("/api/movements")
        .json(&json!({
            "productId": id,
            "kind": "INBOUND",
            "quantity": 5,
            "movementDate": "2025-06-15"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete(&format!("/api/products/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let movements = server.get("/api/movements").await.json::<Value>();
    assert!(movements.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn price_adjustment_applies_to_every_product() {
    let server = test_server();
    create_product(&server, "A", 1).await;
    create_product(&server, "B", 1).await;

    let response = server
        .post("/api/products/price-adjustment")
        .json(&json!({ "percent": 0.1 }))
        .await;

    response.assert_status(StatusCode::OK);
    let adjusted = response.json::<Value>();
    for product in adjusted.as_array().unwrap() {
        let price = product["unitPrice"].as_f64().unwrap();
        assert!((price - 11.55).abs() < 1e-9, "preço reajustado: {price}");
    }
}

#[tokio::test]
async fn reports_reflect_products_and_ledger() {
    let server = test_server();
    let category = create_category(&server, "Bebidas").await;

    // "Suco" com categoria e saldo 12; "Vassoura" sem categoria e saldo 2
    // (abaixo do mínimo 5).
    let suco = server
        .post("/api/products")
        .json(&json!({
            "name": "Suco",
            "unitPrice": 8.5,
            "unit": "L",
            "quantity": 12,
            "minQuantity": 2,
            "maxQuantity": 40,
            "categoryId": category["id"]
        }))
        .await
        .json::<Value>();
    create_product(&server, "Vassoura", 2).await;

    server
        .post("/api/movements")
        .json(&json!({
            "productId": suco["id"],
            "kind": "INBOUND",
            "quantity": 30,
            "movementDate": "2025-06-15"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let below = server.get("/api/reports/below-minimum").await.json::<Value>();
    let names: Vec<&str> = below
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Vassoura"]);

    let counts = server
        .get("/api/reports/count-by-category")
        .await
        .json::<Value>();
    assert_eq!(counts["Bebidas"], 1);
    assert_eq!(counts["Sem categoria"], 1);

    let summary = server.get("/api/reports/top-movers").await.json::<Value>();
    assert_eq!(summary["topInbound"]["name"], "Suco");
    assert_eq!(summary["inboundTotal"], 30);
    assert_eq!(summary["topOutbound"], Value::Null);
    assert_eq!(summary["outboundTotal"], 0);

    // 42 * 8.50 + 2 * 10.50 = 357.00 + 21.00 = 378.00
    let balance = server
        .get("/api/reports/stock-balance")
        .await
        .json::<Value>();
    assert_eq!(balance["totalValue"].as_f64().unwrap(), 378.0);

    let price_list = server.get("/api/reports/price-list").await.json::<Value>();
    let names: Vec<&str> = price_list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Suco", "Vassoura"]);
}
