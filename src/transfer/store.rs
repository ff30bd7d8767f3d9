//! Transfer record store
//!
//! Persistence seam for transfer requests. The engine is the only writer; the
//! store itself enforces nothing beyond id assignment and ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::state::TransferStatus;
use super::types::Transfer;
use crate::core_types::{ProductId, TransferId, WarehouseId};

/// Persisted transfer requests with status and audit timestamps.
#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Insert a new record, assigning its id.
    async fn insert(&self, transfer: Transfer) -> Transfer;

    async fn get(&self, id: TransferId) -> Option<Transfer>;

    /// Overwrite an existing record by id.
    async fn save(&self, transfer: Transfer) -> Transfer;

    /// Remove a record; returns false if it did not exist.
    async fn delete(&self, id: TransferId) -> bool;

    /// All transfers, newest transfer date first.
    async fn list_all(&self) -> Vec<Transfer>;

    /// Transfers where the warehouse is source OR destination.
    async fn list_by_warehouse(&self, warehouse_id: WarehouseId) -> Vec<Transfer>;

    async fn list_by_product(&self, product_id: ProductId) -> Vec<Transfer>;

    async fn list_by_status(&self, status: TransferStatus) -> Vec<Transfer>;
}

/// In-process transfer store backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryTransferStore {
    transfers: DashMap<TransferId, Transfer>,
    id_gen: AtomicU64,
}

impl InMemoryTransferStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> TransferId {
        self.id_gen.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn sorted_newest_first(&self, mut transfers: Vec<Transfer>) -> Vec<Transfer> {
        transfers.sort_by(|a, b| {
            b.transfer_date
                .cmp(&a.transfer_date)
                .then(b.id.cmp(&a.id))
        });
        transfers
    }
}

#[async_trait]
impl TransferStore for InMemoryTransferStore {
    async fn insert(&self, mut transfer: Transfer) -> Transfer {
        transfer.id = self.next_id();
        self.transfers.insert(transfer.id, transfer.clone());
        transfer
    }

    async fn get(&self, id: TransferId) -> Option<Transfer> {
        self.transfers.get(&id).map(|t| t.clone())
    }

    async fn save(&self, transfer: Transfer) -> Transfer {
        self.transfers.insert(transfer.id, transfer.clone());
        transfer
    }

    async fn delete(&self, id: TransferId) -> bool {
        self.transfers.remove(&id).is_some()
    }

    async fn list_all(&self) -> Vec<Transfer> {
        let all = self.transfers.iter().map(|t| t.clone()).collect();
        self.sorted_newest_first(all)
    }

    async fn list_by_warehouse(&self, warehouse_id: WarehouseId) -> Vec<Transfer> {
        let matching = self
            .transfers
            .iter()
            .filter(|t| {
                t.source_warehouse_id == warehouse_id
                    || t.destination_warehouse_id == warehouse_id
            })
            .map(|t| t.clone())
            .collect();
        self.sorted_newest_first(matching)
    }

    async fn list_by_product(&self, product_id: ProductId) -> Vec<Transfer> {
        let matching = self
            .transfers
            .iter()
            .filter(|t| t.product_id == product_id)
            .map(|t| t.clone())
            .collect();
        self.sorted_newest_first(matching)
    }

    async fn list_by_status(&self, status: TransferStatus) -> Vec<Transfer> {
        let matching = self
            .transfers
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.clone())
            .collect();
        self.sorted_newest_first(matching)
    }
}
