use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::core_types::{ProductId, Quantity, WarehouseId};

/// On-hand inventory for one product at one warehouse.
///
/// Unique per (product, warehouse) pair. Counters stay >= 0; the derived
/// available quantity is recomputed on every read and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: Quantity,
    pub min_stock_level: Quantity,
    pub reserved_quantity: Quantity,
    pub consigned_quantity: Quantity,
    pub last_updated: DateTime<Utc>,
}

impl StockRecord {
    /// Create a fresh record with all counters zero except on-hand quantity.
    pub fn new(product_id: ProductId, warehouse_id: WarehouseId, quantity: Quantity) -> Self {
        Self {
            product_id,
            warehouse_id,
            quantity,
            min_stock_level: 0,
            reserved_quantity: 0,
            consigned_quantity: 0,
            last_updated: Utc::now(),
        }
    }

    /// Portion of on-hand stock free to allocate.
    ///
    /// Signed: reservations must never push it below zero, but a consignment
    /// adjustment may leave it negative transiently.
    pub fn available_quantity(&self) -> Quantity {
        self.quantity - self.reserved_quantity - self.consigned_quantity
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

/// Payload for explicitly assigning stock to a warehouse.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewStockRecord {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    #[validate(range(min = 0))]
    pub quantity: Quantity,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub min_stock_level: Quantity,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub consigned_quantity: Quantity,
}

/// Stock store failures.
///
/// The negative-counter variants signal a defect in the caller: the engine
/// always pre-checks availability before adjusting, so they are never a
/// recoverable user error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("No stock record for product {product_id} in warehouse {warehouse_id}")]
    RecordNotFound {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    #[error("Stock record for product {product_id} in warehouse {warehouse_id} already exists")]
    DuplicateRecord {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    #[error(
        "Quantity for product {product_id} in warehouse {warehouse_id} would become negative"
    )]
    NegativeQuantity {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    #[error(
        "Reserved quantity for product {product_id} in warehouse {warehouse_id} would become negative"
    )]
    NegativeReservation {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },
}
