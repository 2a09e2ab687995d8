//! Inventory ledger engine
//!
//! This module provides the `InventoryLedger` that owns the SQLite
//! connection and orchestrates every operation by coordinating the
//! `Catalog`, `LedgerStore`, `BalanceMaterializer`, and `QueryLayer`.
//!
//! The engine enforces the ledger's rules:
//! - Quantities and products are validated before anything is written
//! - A movement and its balance recompute commit together or not at all
//! - Listings and exports never write; opening the store may rewrite
//!   drifted balances when reconcile-on-open is enabled

use crate::config::LedgerConfig;
use crate::core::balance_materializer::{BalanceMaterializer, ReconcileReport};
use crate::core::catalog::Catalog;
use crate::core::ledger_store::LedgerStore;
use crate::core::query::QueryLayer;
use crate::core::schema::ensure_schema;
use crate::core::traits::Clock;
use crate::io::export::export_transactions;
use crate::types::{Balance, BalanceFilter, Direction, LedgerError, MovementRecord, Quantity};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

/// A movement as committed together with the balance it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub movement: MovementRecord,
    pub balance: Balance,
}

/// Single-session inventory ledger over one SQLite store
///
/// The connection is held for the lifetime of the value and closed on drop.
pub struct InventoryLedger {
    conn: Connection,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    export_dir: PathBuf,
}

impl InventoryLedger {
    /// Open (or create) the store described by `config`
    ///
    /// Creates the schema if needed and, when `config.reconcile_on_open` is
    /// set, repairs any balance that disagrees with the ledger.
    pub fn open(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let conn = Connection::open(config.database_path()).map_err(|e| {
            LedgerError::storage(format!(
                "cannot open '{}': {}",
                config.database_path().display(),
                e
            ))
        })?;

        let mut ledger = InventoryLedger::with_connection(
            conn,
            config.catalog.clone(),
            Box::new(config.clock()),
            config.export_dir().to_path_buf(),
        )?;

        if config.reconcile_on_open {
            ledger.reconcile()?;
        }

        info!(path = %config.database_path().display(), "ledger opened");
        Ok(ledger)
    }

    /// Build a ledger over an already-open connection
    pub fn with_connection(
        conn: Connection,
        catalog: Catalog,
        clock: Box<dyn Clock>,
        export_dir: PathBuf,
    ) -> Result<Self, LedgerError> {
        ensure_schema(&conn)?;
        Ok(InventoryLedger {
            conn,
            catalog,
            clock,
            export_dir,
        })
    }

    /// Ledger over a private in-memory store
    pub fn in_memory(
        catalog: Catalog,
        clock: Box<dyn Clock>,
        export_dir: PathBuf,
    ) -> Result<Self, LedgerError> {
        InventoryLedger::with_connection(Connection::open_in_memory()?, catalog, clock, export_dir)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Record one movement and recompute its product's balance
    ///
    /// Both writes happen in one transaction. If either fails the
    /// transaction is rolled back on drop and neither is visible.
    ///
    /// # Errors
    ///
    /// - `NoProductSelected` / `UnknownProduct` from the catalog check
    /// - `QuantityOutOfRange` if the product's total in that direction
    ///   would no longer fit in an `i64`
    /// - `Storage` if the store cannot be written
    pub fn record(
        &mut self,
        product: &str,
        quantity: Quantity,
        direction: Direction,
    ) -> Result<Recorded, LedgerError> {
        let product = self.catalog.resolve(product)?;
        let now = self.clock.now();

        let tx = self.conn.transaction()?;
        let store = LedgerStore::new(&tx);
        store
            .total(&product, direction)?
            .checked_add(quantity.get())
            .ok_or_else(|| LedgerError::QuantityOutOfRange {
                product: product.clone(),
                quantity: quantity.get(),
            })?;
        let movement = store.append(&product, quantity, direction, now)?;
        let balance = BalanceMaterializer::new(&tx).recompute(&product, now)?;
        tx.commit()?;

        info!(
            product = product.as_str(),
            quantity = quantity.get(),
            direction = direction.label(),
            balance = balance.current_stock,
            "movement recorded"
        );

        Ok(Recorded { movement, balance })
    }

    /// Record an inbound movement from user-entered quantity text
    pub fn add_stock(&mut self, product: &str, quantity: &str) -> Result<Recorded, LedgerError> {
        let quantity: Quantity = quantity.parse()?;
        self.record(product, quantity, Direction::Inbound)
    }

    /// Record an outbound movement from user-entered quantity text
    pub fn remove_stock(&mut self, product: &str, quantity: &str) -> Result<Recorded, LedgerError> {
        let quantity: Quantity = quantity.parse()?;
        self.record(product, quantity, Direction::Outbound)
    }

    /// Recompute one product's balance from the ledger
    ///
    /// A product with no movements and no stored balance gets no row; its
    /// zero balance is returned without writing, after the catalog check.
    pub fn recompute(&mut self, product: &str) -> Result<Balance, LedgerError> {
        let product = product.trim();
        let now = self.clock.now();
        let tx = self.conn.transaction()?;

        let known = LedgerStore::new(&tx).has_movements(product)?
            || QueryLayer::new(&tx).balance(product)?.is_some();
        if !known {
            let product = self.catalog.resolve(product)?;
            return Ok(Balance {
                product,
                current_stock: 0,
                last_updated: now,
            });
        }

        let balance = BalanceMaterializer::new(&tx).recompute(product, now)?;
        tx.commit()?;
        Ok(balance)
    }

    /// Recompute every balance, rewriting only those that drifted
    pub fn reconcile(&mut self) -> Result<ReconcileReport, LedgerError> {
        let now = self.clock.now();
        let tx = self.conn.transaction()?;
        let report = BalanceMaterializer::new(&tx).reconcile_all(now)?;
        tx.commit()?;

        info!(
            checked = report.checked,
            repaired = report.repaired.len(),
            "reconciliation finished"
        );
        Ok(report)
    }

    pub fn list_balances(&self, filter: BalanceFilter) -> Result<Vec<Balance>, LedgerError> {
        QueryLayer::new(&self.conn).list_balances(filter)
    }

    pub fn balance(&self, product: &str) -> Result<Option<Balance>, LedgerError> {
        QueryLayer::new(&self.conn).balance(product)
    }

    pub fn list_transactions(&self) -> Result<Vec<MovementRecord>, LedgerError> {
        QueryLayer::new(&self.conn).list_transactions()
    }

    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<MovementRecord>, LedgerError> {
        QueryLayer::new(&self.conn).recent_transactions(limit)
    }

    /// One product's movements, oldest first
    pub fn history(&self, product: &str) -> Result<Vec<MovementRecord>, LedgerError> {
        LedgerStore::new(&self.conn).movements_for(product.trim())
    }

    /// Write the full transaction listing to a timestamped CSV file
    ///
    /// # Returns
    ///
    /// Path of the written file
    pub fn export_transactions(&self) -> Result<PathBuf, LedgerError> {
        let records = self.list_transactions()?;
        export_transactions(&records, &self.export_dir, self.clock.now())
    }
}
