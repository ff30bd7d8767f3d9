//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

/// Warehouse ID - globally unique, immutable after assignment.
pub type WarehouseId = u64;

/// Product ID - globally unique, immutable after assignment.
pub type ProductId = u64;

/// Transfer ID - unique within the system, assigned sequentially.
pub type TransferId = u64;

/// Quantity of stock in whole units.
///
/// Signed so that derived values (available = quantity - reserved - consigned)
/// can go negative transiently; persisted counters must stay >= 0.
pub type Quantity = i64;
