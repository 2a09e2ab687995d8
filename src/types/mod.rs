//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `movement`: Movement records, directions, and quantities
//! - `balance`: Materialized per-product balances
//! - `timestamp`: Wall-clock timestamps as stored in the ledger
//! - `error`: Error types for the stock ledger

pub mod balance;
pub mod error;
pub mod movement;
pub mod timestamp;

pub use balance::{Balance, BalanceFilter};
pub use error::{ErrorKind, LedgerError};
pub use movement::{Direction, MovementId, MovementRecord, Quantity};
pub use timestamp::Timestamp;
