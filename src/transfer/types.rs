//! Transfer record and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::state::TransferStatus;
use crate::core_types::{ProductId, Quantity, TransferId, WarehouseId};

/// A request to move a quantity of one product between two warehouses.
///
/// Quantity, warehouses and product are fixed at creation; only driver,
/// vehicle, notes and the planned transfer date may change, and only while
/// the transfer is PENDING.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub source_warehouse_id: WarehouseId,
    pub destination_warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub driver_name: String,
    pub driver_tc_id: String,
    pub driver_phone: String,
    pub vehicle_plate: String,
    pub status: TransferStatus,
    pub transfer_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    pub cancelled_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transfer {
    /// Build a PENDING transfer from a validated request. The store assigns
    /// the real id on insert.
    pub fn from_request(req: CreateTransfer) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            source_warehouse_id: req.source_warehouse_id,
            destination_warehouse_id: req.destination_warehouse_id,
            product_id: req.product_id,
            quantity: req.quantity,
            driver_name: req.driver_name,
            driver_tc_id: req.driver_tc_id,
            driver_phone: req.driver_phone,
            vehicle_plate: req.vehicle_plate,
            status: TransferStatus::Pending,
            transfer_date: req.transfer_date.unwrap_or(now),
            completed_date: None,
            cancelled_date: None,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer[{}] warehouse {} -> {} product={} qty={} status={}",
            self.id,
            self.source_warehouse_id,
            self.destination_warehouse_id,
            self.product_id,
            self.quantity,
            self.status
        )
    }
}

/// Creation payload.
///
/// Field-shape validation (lengths, ranges) runs at the gateway via
/// `validator`; referential and stock checks happen in the engine.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTransfer {
    pub source_warehouse_id: WarehouseId,
    pub destination_warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    #[validate(length(min = 3, max = 100))]
    pub driver_name: String,
    #[validate(length(equal = 11))]
    pub driver_tc_id: String,
    #[validate(length(min = 10, max = 20))]
    pub driver_phone: String,
    #[validate(length(min = 2, max = 20))]
    pub vehicle_plate: String,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    pub transfer_date: Option<DateTime<Utc>>,
}

/// Metadata update payload; only supplied fields are overwritten.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TransferUpdate {
    #[validate(length(min = 3, max = 100))]
    pub driver_name: Option<String>,
    #[validate(length(equal = 11))]
    pub driver_tc_id: Option<String>,
    #[validate(length(min = 10, max = 20))]
    pub driver_phone: Option<String>,
    #[validate(length(min = 2, max = 20))]
    pub vehicle_plate: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    pub transfer_date: Option<DateTime<Utc>>,
}

/// The driver identification number is exactly 11 digits.
pub fn tc_id_is_valid(tc_id: &str) -> bool {
    tc_id.len() == 11 && tc_id.bytes().all(|b| b.is_ascii_digit())
}
