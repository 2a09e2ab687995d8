//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Clock abstraction for assigned timestamps
//! - `catalog` - Known products and the unknown-product policy
//! - `schema` - SQLite table definitions
//! - `ledger_store` - Append-only movement storage
//! - `balance_materializer` - Full-recompute balance upserts and reconciliation
//! - `query` - Read-only balance and transaction listings
//! - `engine` - Orchestration of validate, append, recompute, query, export

pub mod balance_materializer;
pub mod catalog;
pub mod engine;
pub mod ledger_store;
pub mod query;
pub mod schema;
pub mod traits;

pub use balance_materializer::{BalanceMaterializer, BalanceRepair, ReconcileReport};
pub use catalog::{Catalog, CatalogPolicy};
pub use engine::{InventoryLedger, Recorded};
pub use ledger_store::LedgerStore;
pub use query::QueryLayer;
pub use traits::{Clock, ManualClock, SystemClock};
