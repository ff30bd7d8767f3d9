//! Transfer Error Types
//!
//! Every precondition failure carries a human-readable reason; the numeric
//! HTTP mapping lives here so the gateway stays mechanical.

use thiserror::Error;

use super::state::TransferStatus;
use crate::core_types::{ProductId, Quantity, TransferId, WarehouseId};
use crate::stock::StockError;

/// Transfer engine error taxonomy.
///
/// Not-found on direct lookups maps to 404; constraint violations and invalid
/// state transitions map to 400; stock bookkeeping violations are defects in
/// the engine and map to 500.
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    // === Not-found (direct lookups) ===
    #[error("Transfer not found with id: {0}")]
    TransferNotFound(TransferId),

    #[error("Warehouse not found with id: {0}")]
    WarehouseNotFound(WarehouseId),

    #[error("Product not found with id: {0}")]
    ProductNotFound(ProductId),

    // === Creation preconditions (checked in order) ===
    #[error("Source warehouse not found")]
    SourceWarehouseNotFound(WarehouseId),

    #[error("Destination warehouse not found")]
    DestinationWarehouseNotFound(WarehouseId),

    #[error("Source and destination warehouses must be different")]
    SameWarehouse,

    #[error("Product not found")]
    ProductMissing(ProductId),

    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    #[error("Driver TC ID must be 11 digits")]
    InvalidDriverTcId,

    #[error("Product not found in source warehouse")]
    NoStockAtSource {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    #[error("Insufficient available stock. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        available: Quantity,
        requested: Quantity,
    },

    // === State machine violations ===
    #[error("Only PENDING transfers can be {action}. Current status: {current}")]
    NotPending {
        action: &'static str,
        current: TransferStatus,
    },

    #[error("Cannot {action} a {current} transfer")]
    TerminalState {
        action: &'static str,
        current: TransferStatus,
    },

    #[error("Cannot delete a transfer that is IN_TRANSIT. Cancel it first.")]
    DeleteInTransit,

    #[error("Cannot delete a completed transfer")]
    DeleteCompleted,

    // === Internal ===
    #[error("Stock bookkeeping error: {0}")]
    Stock(#[from] StockError),
}

impl TransferError {
    /// Stable error code for logs and API clients.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::TransferNotFound(_) => "TRANSFER_NOT_FOUND",
            TransferError::WarehouseNotFound(_) => "WAREHOUSE_NOT_FOUND",
            TransferError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            TransferError::SourceWarehouseNotFound(_) => "SOURCE_WAREHOUSE_NOT_FOUND",
            TransferError::DestinationWarehouseNotFound(_) => "DESTINATION_WAREHOUSE_NOT_FOUND",
            TransferError::SameWarehouse => "SAME_WAREHOUSE",
            TransferError::ProductMissing(_) => "PRODUCT_NOT_FOUND",
            TransferError::InvalidQuantity => "INVALID_QUANTITY",
            TransferError::InvalidDriverTcId => "INVALID_DRIVER_TC_ID",
            TransferError::NoStockAtSource { .. } => "NO_STOCK_AT_SOURCE",
            TransferError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            TransferError::NotPending { .. } => "INVALID_STATE_TRANSITION",
            TransferError::TerminalState { .. } => "INVALID_STATE_TRANSITION",
            TransferError::DeleteInTransit => "DELETE_BLOCKED",
            TransferError::DeleteCompleted => "DELETE_BLOCKED",
            TransferError::Stock(_) => "STOCK_BOOKKEEPING_ERROR",
        }
    }

    /// HTTP status code suggestion.
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::TransferNotFound(_)
            | TransferError::WarehouseNotFound(_)
            | TransferError::ProductNotFound(_) => 404,

            TransferError::SourceWarehouseNotFound(_)
            | TransferError::DestinationWarehouseNotFound(_)
            | TransferError::SameWarehouse
            | TransferError::ProductMissing(_)
            | TransferError::InvalidQuantity
            | TransferError::InvalidDriverTcId
            | TransferError::NoStockAtSource { .. }
            | TransferError::InsufficientStock { .. }
            | TransferError::NotPending { .. }
            | TransferError::TerminalState { .. }
            | TransferError::DeleteInTransit
            | TransferError::DeleteCompleted => 400,

            TransferError::Stock(_) => 500,
        }
    }
}
