//! Stock record endpoints.
//!
//! Direct stock assignment and inspection. Transfer-driven mutation goes
//! through the engine, never through these handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::core_types::{ProductId, WarehouseId};
use crate::stock::{NewStockRecord, StockRecord};

use super::check;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, created, ok};

pub async fn create_stock(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewStockRecord>,
) -> ApiResult<StockRecord> {
    check(&payload)?;

    state
        .warehouses
        .get(payload.warehouse_id)
        .await
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Warehouse not found with id: {}",
                payload.warehouse_id
            ))
        })?;
    state.products.get(payload.product_id).await.ok_or_else(|| {
        ApiError::not_found(format!("Product not found with id: {}", payload.product_id))
    })?;

    let mut record = StockRecord::new(payload.product_id, payload.warehouse_id, payload.quantity);
    record.min_stock_level = payload.min_stock_level;
    record.consigned_quantity = payload.consigned_quantity;

    let record = state.stock.create(record).await?;
    created(record)
}

pub async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path((product_id, warehouse_id)): Path<(ProductId, WarehouseId)>,
) -> ApiResult<StockRecord> {
    let record = state
        .stock
        .get(product_id, warehouse_id)
        .await
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "No stock record for product {product_id} in warehouse {warehouse_id}"
            ))
        })?;
    ok(record)
}

pub async fn list_stocks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<StockRecord>> {
    ok(state.stock.list().await)
}

pub async fn list_low_stocks(State(state): State<Arc<AppState>>) -> ApiResult<Vec<StockRecord>> {
    let low = state
        .stock
        .list()
        .await
        .into_iter()
        .filter(StockRecord::is_low_stock)
        .collect();
    ok(low)
}
