//! Stock Ledger Library
//! # Overview
//!
//! An append-only ledger of stock movements with a materialized balance per
//! product, backed by SQLite.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Quantity, MovementRecord, Balance, LedgerError)
//! - [`config`] - Store location, export directory, catalog, and UTC offset
//! - [`core`] - Business logic components:
//!   - [`core::catalog`] - Known products and the unknown-product policy
//!   - [`core::ledger_store`] - Append-only inbound and outbound movements
//!   - [`core::balance_materializer`] - Balance recompute and reconciliation
//!   - [`core::query`] - Balance and transaction listings
//!   - [`core::engine`] - `InventoryLedger`, the entry point for every operation
//! - [`io`] - CSV rendering and timestamped exports
//! - [`cli`] - Argument parsing and command dispatch
//! - [`logging`] - Tracing subscriber setup
//!
//! # Movements
//!
//! - **Entrada**: stock received, added to the balance
//! - **Saída**: stock taken out, subtracted from the balance
//!
//! A balance is always `sum(inbound) - sum(outbound)` for its product and
//! may go negative.

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use config::LedgerConfig;
pub use core::{Catalog, CatalogPolicy, InventoryLedger, ManualClock, Recorded};
pub use io::{write_balances_csv, write_transactions_csv};
pub use types::{
    Balance, BalanceFilter, Direction, ErrorKind, LedgerError, MovementId, MovementRecord,
    Quantity, Timestamp,
};
