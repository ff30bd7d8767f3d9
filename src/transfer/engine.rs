//! Transfer Engine
//!
//! Sole writer of transfer status and sole orchestrator of cross-row stock
//! mutation. Every mutating operation validates eagerly, then mutates under
//! the engine write lock so no partial state is ever observable.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::TransferError;
use super::state::TransferStatus;
use super::store::TransferStore;
use super::types::{CreateTransfer, Transfer, TransferUpdate, tc_id_is_valid};
use crate::catalog::{ProductCatalog, WarehouseDirectory};
use crate::core_types::{ProductId, TransferId, WarehouseId};
use crate::stock::{StockError, StockRecord, StockStore};

/// Orchestrates the transfer lifecycle against the transfer and stock stores.
pub struct TransferEngine {
    transfers: Arc<dyn TransferStore>,
    stock: Arc<dyn StockStore>,
    warehouses: Arc<dyn WarehouseDirectory>,
    products: Arc<dyn ProductCatalog>,
    /// Serializes mutating operations. Contention is only ever on shared
    /// stock rows, and the workflow is synchronous and caller-driven, so one
    /// coarse lock keeps each operation atomic.
    write_lock: Mutex<()>,
}

impl TransferEngine {
    pub fn new(
        transfers: Arc<dyn TransferStore>,
        stock: Arc<dyn StockStore>,
        warehouses: Arc<dyn WarehouseDirectory>,
        products: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            transfers,
            stock,
            warehouses,
            products,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a transfer in PENDING state.
    ///
    /// Availability is checked but nothing is reserved; `start` re-checks and
    /// takes the reservation. Two concurrent creates may both pass the check
    /// here, and the re-check at `start` resolves the race.
    pub async fn create(&self, req: CreateTransfer) -> Result<Transfer, TransferError> {
        let _guard = self.write_lock.lock().await;

        let source = self
            .warehouses
            .get(req.source_warehouse_id)
            .await
            .ok_or(TransferError::SourceWarehouseNotFound(
                req.source_warehouse_id,
            ))?;
        let destination = self.warehouses.get(req.destination_warehouse_id).await.ok_or(
            TransferError::DestinationWarehouseNotFound(req.destination_warehouse_id),
        )?;

        if source.id == destination.id {
            return Err(TransferError::SameWarehouse);
        }

        let product = self
            .products
            .get(req.product_id)
            .await
            .ok_or(TransferError::ProductMissing(req.product_id))?;

        if req.quantity < 1 {
            return Err(TransferError::InvalidQuantity);
        }

        if !tc_id_is_valid(&req.driver_tc_id) {
            return Err(TransferError::InvalidDriverTcId);
        }

        let source_stock = self.source_stock(product.id, source.id).await?;
        self.check_available(&source_stock, req.quantity)?;

        let transfer = self.transfers.insert(Transfer::from_request(req)).await;
        info!(
            transfer_id = transfer.id,
            "Transfer created: warehouse {} -> {} product={} qty={}",
            transfer.source_warehouse_id,
            transfer.destination_warehouse_id,
            transfer.product_id,
            transfer.quantity
        );
        Ok(transfer)
    }

    /// PENDING -> IN_TRANSIT: re-check availability and reserve at source.
    pub async fn start(&self, transfer_id: TransferId) -> Result<Transfer, TransferError> {
        let _guard = self.write_lock.lock().await;

        let mut transfer = self.fetch(transfer_id).await?;
        if transfer.status != TransferStatus::Pending {
            return Err(TransferError::NotPending {
                action: "started",
                current: transfer.status,
            });
        }

        let source_stock = self
            .source_stock(transfer.product_id, transfer.source_warehouse_id)
            .await?;
        self.check_available(&source_stock, transfer.quantity)?;

        self.stock
            .adjust_reserved(
                transfer.product_id,
                transfer.source_warehouse_id,
                transfer.quantity,
            )
            .await?;

        transfer.status = TransferStatus::InTransit;
        transfer.updated_at = Utc::now();
        let transfer = self.transfers.save(transfer).await;
        info!(
            transfer_id = transfer.id,
            qty = transfer.quantity,
            "Transfer started, stock reserved at source"
        );
        Ok(transfer)
    }

    /// Move the quantity from source to destination and finish the transfer.
    ///
    /// A PENDING transfer may complete without ever being started; in that
    /// case there is no reservation to release and availability is re-checked
    /// instead. An IN_TRANSIT transfer releases the reservation taken at
    /// `start` alongside the on-hand decrement.
    pub async fn complete(&self, transfer_id: TransferId) -> Result<Transfer, TransferError> {
        let _guard = self.write_lock.lock().await;

        let mut transfer = self.fetch(transfer_id).await?;
        if transfer.status.is_terminal() {
            return Err(TransferError::TerminalState {
                action: "complete",
                current: transfer.status,
            });
        }

        let source_stock = self
            .source_stock(transfer.product_id, transfer.source_warehouse_id)
            .await?;

        let release_reservation = match transfer.status {
            TransferStatus::Pending => {
                self.check_available(&source_stock, transfer.quantity)?;
                false
            }
            TransferStatus::InTransit => {
                // Both decrements must succeed together; verify up front so
                // the mutation phase cannot fail halfway.
                if source_stock.quantity < transfer.quantity {
                    return Err(StockError::NegativeQuantity {
                        product_id: transfer.product_id,
                        warehouse_id: transfer.source_warehouse_id,
                    }
                    .into());
                }
                if source_stock.reserved_quantity < transfer.quantity {
                    return Err(StockError::NegativeReservation {
                        product_id: transfer.product_id,
                        warehouse_id: transfer.source_warehouse_id,
                    }
                    .into());
                }
                true
            }
            _ => unreachable!("terminal states rejected above"),
        };

        self.stock
            .adjust_quantity(
                transfer.product_id,
                transfer.source_warehouse_id,
                -transfer.quantity,
            )
            .await?;
        if release_reservation {
            self.stock
                .adjust_reserved(
                    transfer.product_id,
                    transfer.source_warehouse_id,
                    -transfer.quantity,
                )
                .await?;
        }

        let destination = self
            .stock
            .fetch_or_create(transfer.product_id, transfer.destination_warehouse_id)
            .await;
        if destination.was_created() {
            debug!(
                transfer_id = transfer.id,
                warehouse_id = transfer.destination_warehouse_id,
                "Created destination stock record"
            );
        }
        self.stock
            .adjust_quantity(
                transfer.product_id,
                transfer.destination_warehouse_id,
                transfer.quantity,
            )
            .await?;

        let now = Utc::now();
        transfer.status = TransferStatus::Completed;
        transfer.completed_date = Some(now);
        transfer.updated_at = now;
        let transfer = self.transfers.save(transfer).await;
        info!(
            transfer_id = transfer.id,
            qty = transfer.quantity,
            "Transfer completed: warehouse {} -> {}",
            transfer.source_warehouse_id,
            transfer.destination_warehouse_id
        );
        Ok(transfer)
    }

    /// Cancel a PENDING or IN_TRANSIT transfer, releasing any reservation.
    pub async fn cancel(&self, transfer_id: TransferId) -> Result<Transfer, TransferError> {
        let _guard = self.write_lock.lock().await;

        let mut transfer = self.fetch(transfer_id).await?;
        if transfer.status.is_terminal() {
            return Err(TransferError::TerminalState {
                action: "cancel",
                current: transfer.status,
            });
        }

        if transfer.status == TransferStatus::InTransit {
            // Release exactly the reservation taken at start.
            self.source_stock(transfer.product_id, transfer.source_warehouse_id)
                .await?;
            self.stock
                .adjust_reserved(
                    transfer.product_id,
                    transfer.source_warehouse_id,
                    -transfer.quantity,
                )
                .await?;
        }

        let now = Utc::now();
        transfer.status = TransferStatus::Cancelled;
        transfer.cancelled_date = Some(now);
        transfer.updated_at = now;
        let transfer = self.transfers.save(transfer).await;
        info!(transfer_id = transfer.id, "Transfer cancelled");
        Ok(transfer)
    }

    /// Overwrite the supplied metadata fields of a PENDING transfer.
    pub async fn update(
        &self,
        transfer_id: TransferId,
        update: TransferUpdate,
    ) -> Result<Transfer, TransferError> {
        let _guard = self.write_lock.lock().await;

        let mut transfer = self.fetch(transfer_id).await?;
        if transfer.status != TransferStatus::Pending {
            return Err(TransferError::NotPending {
                action: "updated",
                current: transfer.status,
            });
        }

        if let Some(ref tc_id) = update.driver_tc_id
            && !tc_id_is_valid(tc_id)
        {
            return Err(TransferError::InvalidDriverTcId);
        }

        if let Some(driver_name) = update.driver_name {
            transfer.driver_name = driver_name;
        }
        if let Some(driver_tc_id) = update.driver_tc_id {
            transfer.driver_tc_id = driver_tc_id;
        }
        if let Some(driver_phone) = update.driver_phone {
            transfer.driver_phone = driver_phone;
        }
        if let Some(vehicle_plate) = update.vehicle_plate {
            transfer.vehicle_plate = vehicle_plate;
        }
        if let Some(notes) = update.notes {
            transfer.notes = Some(notes);
        }
        if let Some(transfer_date) = update.transfer_date {
            transfer.transfer_date = transfer_date;
        }

        transfer.updated_at = Utc::now();
        Ok(self.transfers.save(transfer).await)
    }

    /// Delete a PENDING or CANCELLED transfer outright.
    ///
    /// PENDING holds no reservation and CANCELLED released its own, so no
    /// stock rollback is needed.
    pub async fn delete(&self, transfer_id: TransferId) -> Result<(), TransferError> {
        let _guard = self.write_lock.lock().await;

        let transfer = self.fetch(transfer_id).await?;
        match transfer.status {
            TransferStatus::InTransit => Err(TransferError::DeleteInTransit),
            TransferStatus::Completed => Err(TransferError::DeleteCompleted),
            _ => {
                self.transfers.delete(transfer_id).await;
                info!(transfer_id, "Transfer deleted");
                Ok(())
            }
        }
    }

    // === Queries (pure reads, no stock interaction) ===

    pub async fn get(&self, transfer_id: TransferId) -> Result<Transfer, TransferError> {
        self.fetch(transfer_id).await
    }

    pub async fn list_all(&self) -> Vec<Transfer> {
        self.transfers.list_all().await
    }

    pub async fn list_by_warehouse(
        &self,
        warehouse_id: WarehouseId,
    ) -> Result<Vec<Transfer>, TransferError> {
        self.warehouses
            .get(warehouse_id)
            .await
            .ok_or(TransferError::WarehouseNotFound(warehouse_id))?;
        Ok(self.transfers.list_by_warehouse(warehouse_id).await)
    }

    pub async fn list_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Transfer>, TransferError> {
        self.products
            .get(product_id)
            .await
            .ok_or(TransferError::ProductNotFound(product_id))?;
        Ok(self.transfers.list_by_product(product_id).await)
    }

    pub async fn list_by_status(&self, status: TransferStatus) -> Vec<Transfer> {
        self.transfers.list_by_status(status).await
    }

    // === Helpers ===

    async fn fetch(&self, transfer_id: TransferId) -> Result<Transfer, TransferError> {
        self.transfers
            .get(transfer_id)
            .await
            .ok_or(TransferError::TransferNotFound(transfer_id))
    }

    async fn source_stock(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<StockRecord, TransferError> {
        self.stock
            .get(product_id, warehouse_id)
            .await
            .ok_or(TransferError::NoStockAtSource {
                product_id,
                warehouse_id,
            })
    }

    fn check_available(
        &self,
        stock: &StockRecord,
        requested: i64,
    ) -> Result<(), TransferError> {
        let available = stock.available_quantity();
        if available < requested {
            return Err(TransferError::InsufficientStock {
                available,
                requested,
            });
        }
        Ok(())
    }
}
