//! Stockroom - Warehouse Inventory Backend
//!
//! A stock transfer state machine with coupled stock-quantity bookkeeping,
//! exposed over a REST API.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (WarehouseId, ProductId, etc.)
//! - [`config`] - YAML application configuration
//! - [`logging`] - Rolling-file tracing setup
//! - [`catalog`] - Warehouse and product collaborators
//! - [`stock`] - Per-(product, warehouse) stock records and their store
//! - [`transfer`] - The transfer state machine and its engine
//! - [`gateway`] - Axum HTTP surface with basic-auth middleware

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod logging;

// Domain components
pub mod catalog;
pub mod stock;
pub mod transfer;

// HTTP surface
pub mod gateway;

// Convenient re-exports at crate root
pub use catalog::{Product, Warehouse};
pub use config::AppConfig;
pub use core_types::{ProductId, Quantity, TransferId, WarehouseId};
pub use stock::{StockError, StockRecord, StockStore};
pub use transfer::{Transfer, TransferEngine, TransferError, TransferStatus};
