//! Transfer lifecycle and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::core_types::{ProductId, TransferId, WarehouseId};
use crate::transfer::{CreateTransfer, TransferStatus, TransferUpdate};

use super::check;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, TransferDto, created, ok};

pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTransfer>,
) -> ApiResult<TransferDto> {
    check(&payload)?;
    let transfer = state.engine.create(payload).await?;
    created(state.transfer_dto(transfer).await)
}

pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<TransferDto> {
    let transfer = state.engine.get(id).await?;
    ok(state.transfer_dto(transfer).await)
}

pub async fn list_transfers(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TransferDto>> {
    let transfers = state.engine.list_all().await;
    ok(state.transfer_dtos(transfers).await)
}

pub async fn list_by_warehouse(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<WarehouseId>,
) -> ApiResult<Vec<TransferDto>> {
    let transfers = state.engine.list_by_warehouse(warehouse_id).await?;
    ok(state.transfer_dtos(transfers).await)
}

pub async fn list_by_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ProductId>,
) -> ApiResult<Vec<TransferDto>> {
    let transfers = state.engine.list_by_product(product_id).await?;
    ok(state.transfer_dtos(transfers).await)
}

pub async fn list_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> ApiResult<Vec<TransferDto>> {
    let status: TransferStatus = status
        .parse()
        .map_err(|e: crate::transfer::ParseStatusError| ApiError::bad_request(e.to_string()))?;
    let transfers = state.engine.list_by_status(status).await;
    ok(state.transfer_dtos(transfers).await)
}

pub async fn start_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<TransferDto> {
    let transfer = state.engine.start(id).await?;
    ok(state.transfer_dto(transfer).await)
}

pub async fn complete_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<TransferDto> {
    let transfer = state.engine.complete(id).await?;
    ok(state.transfer_dto(transfer).await)
}

pub async fn cancel_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<TransferDto> {
    let transfer = state.engine.cancel(id).await?;
    ok(state.transfer_dto(transfer).await)
}

pub async fn update_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
    Json(payload): Json<TransferUpdate>,
) -> ApiResult<TransferDto> {
    check(&payload)?;
    let transfer = state.engine.update(id, payload).await?;
    ok(state.transfer_dto(transfer).await)
}

pub async fn delete_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TransferId>,
) -> ApiResult<()> {
    state.engine.delete(id).await?;
    ok(())
}
