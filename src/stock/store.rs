//! Stock record store
//!
//! Fetch, fetch-or-create and counter adjustments, each atomic with respect
//! to a single (product, warehouse) record. Cross-record atomicity is the
//! transfer engine's job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::record::{StockError, StockRecord};
use crate::core_types::{ProductId, Quantity, WarehouseId};

/// Result of a fetch-or-create lookup, tagged so callers can tell whether the
/// destination record pre-existed.
#[derive(Debug, Clone)]
pub enum StockLookup {
    Found(StockRecord),
    Created(StockRecord),
}

impl StockLookup {
    pub fn record(self) -> StockRecord {
        match self {
            StockLookup::Found(r) | StockLookup::Created(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, StockLookup::Created(_))
    }
}

/// Persisted quantity state per (product, warehouse) pair.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn get(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Option<StockRecord>;

    /// Fetch the record, creating a zero-quantity one if absent.
    async fn fetch_or_create(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> StockLookup;

    /// Explicit stock assignment. Fails if the pair already has a record.
    async fn create(&self, record: StockRecord) -> Result<StockRecord, StockError>;

    /// Adjust on-hand quantity by `delta` (may be negative). The result must
    /// stay >= 0; a violation is a defect in the caller.
    async fn adjust_quantity(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Quantity,
    ) -> Result<StockRecord, StockError>;

    /// Adjust reserved quantity by `delta`, same non-negativity contract.
    async fn adjust_reserved(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Quantity,
    ) -> Result<StockRecord, StockError>;

    async fn list(&self) -> Vec<StockRecord>;
}

/// In-process stock store backed by a concurrent map keyed by
/// (product, warehouse).
#[derive(Default)]
pub struct InMemoryStockStore {
    records: DashMap<(ProductId, WarehouseId), StockRecord>,
}

impl InMemoryStockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn get(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Option<StockRecord> {
        self.records
            .get(&(product_id, warehouse_id))
            .map(|r| r.clone())
    }

    async fn fetch_or_create(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> StockLookup {
        let mut created = false;
        let entry = self
            .records
            .entry((product_id, warehouse_id))
            .or_insert_with(|| {
                created = true;
                StockRecord::new(product_id, warehouse_id, 0)
            });
        let record = entry.clone();
        drop(entry);

        if created {
            StockLookup::Created(record)
        } else {
            StockLookup::Found(record)
        }
    }

    async fn create(&self, record: StockRecord) -> Result<StockRecord, StockError> {
        let key = (record.product_id, record.warehouse_id);
        match self.records.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StockError::DuplicateRecord {
                product_id: key.0,
                warehouse_id: key.1,
            }),
            dashmap::mapref::entry::Entry::Vacant(v) => {
                v.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn adjust_quantity(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Quantity,
    ) -> Result<StockRecord, StockError> {
        let mut entry = self.records.get_mut(&(product_id, warehouse_id)).ok_or(
            StockError::RecordNotFound {
                product_id,
                warehouse_id,
            },
        )?;

        if entry.quantity + delta < 0 {
            return Err(StockError::NegativeQuantity {
                product_id,
                warehouse_id,
            });
        }

        entry.quantity += delta;
        entry.last_updated = Utc::now();
        Ok(entry.clone())
    }

    async fn adjust_reserved(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Quantity,
    ) -> Result<StockRecord, StockError> {
        let mut entry = self.records.get_mut(&(product_id, warehouse_id)).ok_or(
            StockError::RecordNotFound {
                product_id,
                warehouse_id,
            },
        )?;

        if entry.reserved_quantity + delta < 0 {
            return Err(StockError::NegativeReservation {
                product_id,
                warehouse_id,
            });
        }

        entry.reserved_quantity += delta;
        entry.last_updated = Utc::now();
        Ok(entry.clone())
    }

    async fn list(&self) -> Vec<StockRecord> {
        let mut all: Vec<StockRecord> = self.records.iter().map(|r| r.clone()).collect();
        all.sort_by_key(|r| (r.warehouse_id, r.product_id));
        all
    }
}
