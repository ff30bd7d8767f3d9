//! Warehouse and product endpoints.
//!
//! Minimal CRUD so the transfer workflow can be driven end to end; the
//! transfer engine itself only reads these collections.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::catalog::{NewProduct, NewWarehouse, Product, Warehouse};
use crate::core_types::{ProductId, WarehouseId};

use super::check;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, created, ok};

pub async fn create_warehouse(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewWarehouse>,
) -> ApiResult<Warehouse> {
    check(&payload)?;
    created(state.warehouses.insert(payload).await)
}

pub async fn get_warehouse(
    State(state): State<Arc<AppState>>,
    Path(id): Path<WarehouseId>,
) -> ApiResult<Warehouse> {
    let warehouse = state
        .warehouses
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("Warehouse not found with id: {id}")))?;
    ok(warehouse)
}

pub async fn list_warehouses(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Warehouse>> {
    ok(state.warehouses.list().await)
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Product> {
    check(&payload)?;
    created(state.products.insert(payload).await)
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProductId>,
) -> ApiResult<Product> {
    let product = state
        .products
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("Product not found with id: {id}")))?;
    ok(product)
}

pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    ok(state.products.list().await)
}
