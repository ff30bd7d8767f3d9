//! Stock transfer workflow
//!
//! A transfer moves a quantity of one product between two warehouses through
//! a small state machine:
//!
//! ```text
//! PENDING ──▶ IN_TRANSIT ──▶ COMPLETED
//!    │             │
//!    └─────────────┴──▶ CANCELLED
//! ```
//!
//! Stock effects per transition:
//! - create: validate only, no stock touched
//! - start: reserve the quantity at the source
//! - complete: decrement source on-hand (and reservation, if one was taken),
//!   increment destination, creating the destination record if absent
//! - cancel: release the reservation if one was taken
//!
//! [`TransferEngine`] is the only writer; it serializes mutating operations so
//! availability checks and the mutations they guard are atomic.

pub mod engine;
pub mod error;
pub mod state;
pub mod store;
pub mod types;

pub use engine::TransferEngine;
pub use error::TransferError;
pub use state::{ParseStatusError, TransferStatus};
pub use store::{InMemoryTransferStore, TransferStore};
pub use types::{CreateTransfer, Transfer, TransferUpdate};
