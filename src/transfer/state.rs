//! Transfer lifecycle states
//!
//! State IDs are stable SMALLINT values so a relational store can persist the
//! status without string parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, de};
use thiserror::Error;

/// Transfer lifecycle states
///
/// ```text
/// PENDING ──▶ IN_TRANSIT ──▶ COMPLETED
///    │             │
///    └─────────────┴──▶ CANCELLED
/// ```
///
/// Terminal states: COMPLETED (20), CANCELLED (-10). No transition leaves a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum TransferStatus {
    /// Initial state - request validated and recorded, no stock touched
    Pending = 0,

    /// Reservation taken at source; goods still physically in the source
    /// warehouse, earmarked for the move
    InTransit = 10,

    /// Terminal: quantity moved from source to destination
    Completed = 20,

    /// Terminal: request withdrawn, any reservation released
    Cancelled = -10,
}

impl TransferStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Cancelled)
    }

    /// Get the numeric state ID for relational storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from a stored state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransferStatus::Pending),
            10 => Some(TransferStatus::InTransit),
            20 => Some(TransferStatus::Completed),
            -10 => Some(TransferStatus::Cancelled),
            _ => None,
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::InTransit => "IN_TRANSIT",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown status string on the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid status. Valid values: PENDING, IN_TRANSIT, COMPLETED, CANCELLED")]
pub struct ParseStatusError;

impl FromStr for TransferStatus {
    type Err = ParseStatusError;

    /// Case-insensitive on input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransferStatus::Pending),
            "IN_TRANSIT" => Ok(TransferStatus::InTransit),
            "COMPLETED" => Ok(TransferStatus::Completed),
            "CANCELLED" => Ok(TransferStatus::Cancelled),
            _ => Err(ParseStatusError),
        }
    }
}

impl TryFrom<i16> for TransferStatus {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TransferStatus::from_id(value).ok_or(())
    }
}

impl Serialize for TransferStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransferStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
