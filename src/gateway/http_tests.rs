//! Router-level tests driving the gateway with `tower::ServiceExt::oneshot`,
//! auth middleware included.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::catalog::{InMemoryProductCatalog, InMemoryWarehouseDirectory};
use crate::config::AuthConfig;
use crate::gateway::{build_router, state::AppState};
use crate::stock::InMemoryStockStore;
use crate::transfer::{InMemoryTransferStore, TransferEngine};

fn test_router() -> Router {
    let warehouses = InMemoryWarehouseDirectory::new();
    let products = InMemoryProductCatalog::new();
    let stock = InMemoryStockStore::new();
    let transfers = InMemoryTransferStore::new();

    let engine = Arc::new(TransferEngine::new(
        transfers,
        stock.clone(),
        warehouses.clone(),
        products.clone(),
    ));

    let state = Arc::new(AppState::new(
        engine,
        warehouses,
        products,
        stock,
        AuthConfig::default(),
    ));
    build_router(state)
}

fn auth_header() -> String {
    format!("Basic {}", BASE64.encode("admin:admin"))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header())
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seed two warehouses, a product, and 100 units of stock at the first
/// warehouse, all through the API. Returns (source_id, destination_id,
/// product_id).
async fn seed(router: &Router) -> (u64, u64, u64) {
    let mut ids = Vec::new();
    for (name, location) in [("Central", "Ankara"), ("Coastal", "Izmir")] {
        let response = router
            .clone()
            .oneshot(request(
                "POST",
                "/api/warehouses",
                Some(json!({"name": name, "location": location})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(json_body(response).await["data"]["id"].as_u64().unwrap());
    }

    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/products",
            Some(json!({"name": "Steel Bolt M8", "sku": "SB-M8"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let product_id = json_body(response).await["data"]["id"].as_u64().unwrap();

    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/stocks",
            Some(json!({
                "product_id": product_id,
                "warehouse_id": ids[0],
                "quantity": 100
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    (ids[0], ids[1], product_id)
}

fn transfer_payload(source: u64, destination: u64, product: u64, quantity: i64) -> Value {
    json!({
        "source_warehouse_id": source,
        "destination_warehouse_id": destination,
        "product_id": product,
        "quantity": quantity,
        "driver_name": "Mehmet Demir",
        "driver_tc_id": "12345678901",
        "driver_phone": "05321234567",
        "vehicle_plate": "34 ABC 123"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let router = test_router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_missing_auth_is_rejected() {
    let router = test_router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/transfers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(json_body(response).await["code"], 2001);
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let router = test_router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/transfers")
                .header(
                    header::AUTHORIZATION,
                    format!("Basic {}", BASE64.encode("admin:wrong")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], 2002);
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let router = test_router();
    let (source, destination, product) = seed(&router).await;

    // Create
    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/transfers",
            Some(transfer_payload(source, destination, product, 30)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["source_warehouse"]["name"], "Central");
    assert_eq!(body["data"]["product"]["sku"], "SB-M8");
    let id = body["data"]["id"].as_u64().unwrap();

    // Start
    let response = router
        .clone()
        .oneshot(request("POST", &format!("/api/transfers/{id}/start"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["status"], "IN_TRANSIT");

    // Complete
    let response = router
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/transfers/{id}/complete"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "COMPLETED");
    assert!(body["data"]["completed_date"].is_string());

    // Stock moved
    let response = router
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/stocks/product/{product}/warehouse/{destination}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["quantity"], 30);

    let response = router
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/stocks/product/{product}/warehouse/{source}"),
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["quantity"], 70);
    assert_eq!(body["data"]["reserved_quantity"], 0);
}

#[tokio::test]
async fn test_create_rejects_same_warehouse() {
    let router = test_router();
    let (source, _, product) = seed(&router).await;

    let response = router
        .oneshot(request(
            "POST",
            "/api/transfers",
            Some(transfer_payload(source, source, product, 10)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["msg"],
        "Source and destination warehouses must be different"
    );
}

#[tokio::test]
async fn test_create_rejects_insufficient_stock_with_counts() {
    let router = test_router();
    let (source, destination, product) = seed(&router).await;

    let response = router
        .oneshot(request(
            "POST",
            "/api/transfers",
            Some(transfer_payload(source, destination, product, 150)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["msg"],
        "Insufficient available stock. Available: 100, Requested: 150"
    );
}

#[tokio::test]
async fn test_body_validation_runs_before_engine() {
    let router = test_router();
    let (source, destination, product) = seed(&router).await;

    let mut payload = transfer_payload(source, destination, product, 10);
    payload["driver_tc_id"] = json!("123");
    let response = router
        .oneshot(request("POST", "/api/transfers", Some(payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn test_unknown_status_filter_is_rejected() {
    let router = test_router();
    let response = router
        .oneshot(request("GET", "/api/transfers/status/SHIPPED", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["msg"],
        "Invalid status. Valid values: PENDING, IN_TRANSIT, COMPLETED, CANCELLED"
    );
}

#[tokio::test]
async fn test_status_filter_is_case_insensitive() {
    let router = test_router();
    let (source, destination, product) = seed(&router).await;

    router
        .clone()
        .oneshot(request(
            "POST",
            "/api/transfers",
            Some(transfer_payload(source, destination, product, 10)),
        ))
        .await
        .unwrap();

    let response = router
        .oneshot(request("GET", "/api/transfers/status/pending", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_transfer_is_404() {
    let router = test_router();
    let response = router
        .oneshot(request("GET", "/api/transfers/999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], 4004);
    assert_eq!(body["msg"], "Transfer not found with id: 999");
}

#[tokio::test]
async fn test_delete_in_transit_is_blocked() {
    let router = test_router();
    let (source, destination, product) = seed(&router).await;

    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/transfers",
            Some(transfer_payload(source, destination, product, 10)),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["data"]["id"].as_u64().unwrap();

    router
        .clone()
        .oneshot(request("POST", &format!("/api/transfers/{id}/start"), None))
        .await
        .unwrap();

    let response = router
        .oneshot(request("DELETE", &format!("/api/transfers/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["msg"],
        "Cannot delete a transfer that is IN_TRANSIT. Cancel it first."
    );
}
