//! Stock records and the stock record store
//!
//! One [`StockRecord`] exists per (product, warehouse) pair. The transfer
//! engine is the only component that mutates records across two warehouses at
//! once; everything here is atomic with respect to a single record.

pub mod record;
pub mod store;

pub use record::{NewStockRecord, StockError, StockRecord};
pub use store::{InMemoryStockStore, StockLookup, StockStore};
