//! Balance materialization
//!
//! This module provides the `BalanceMaterializer` that derives a product's
//! balance from the movement history and writes it to `balanced_stock`.
//!
//! # Full Recompute
//!
//! A balance is never adjusted by a delta. Every recompute sums the whole
//! inbound and outbound history of the product, so a missed or failed
//! update cannot leave permanent drift: the next recompute fixes it.
//!
//! # Upsert
//!
//! The first recompute for a product inserts its row; later recomputes
//! overwrite `current_stock` and `updated_at`. Rows are never deleted.

use crate::core::ledger_store::LedgerStore;
use crate::core::query::QueryLayer;
use crate::types::{Balance, BalanceFilter, Direction, LedgerError, Timestamp};
use rusqlite::{params, Connection};
use tracing::{debug, warn};

/// A balance whose stored value disagreed with the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRepair {
    pub product: String,
    /// Stored value before the repair, `None` if the row was missing
    pub previous: Option<i64>,
    /// Value derived from the ledger
    pub current: i64,
}

/// Outcome of a full reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Number of products examined
    pub checked: usize,
    /// Balances that had to be rewritten
    pub repaired: Vec<BalanceRepair>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.repaired.is_empty()
    }
}

/// Derives and stores balances over a borrowed SQLite connection
pub struct BalanceMaterializer<'conn> {
    conn: &'conn Connection,
}

impl<'conn> BalanceMaterializer<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        BalanceMaterializer { conn }
    }

    /// Net stock of a product according to the ledger alone
    ///
    /// # Errors
    ///
    /// Returns a storage error if the sums cannot be read or the difference
    /// does not fit in an `i64`.
    pub fn derive(&self, product: &str) -> Result<i64, LedgerError> {
        let store = LedgerStore::new(self.conn);
        let inbound = store.total(product, Direction::Inbound)?;
        let outbound = store.total(product, Direction::Outbound)?;
        inbound.checked_sub(outbound).ok_or_else(|| {
            LedgerError::storage(format!("balance of '{}' overflows", product))
        })
    }

    /// Recompute a product's balance from the ledger and store it
    ///
    /// Writes the row unconditionally; callers pass names that already
    /// have movements or a stored balance.
    ///
    /// # Arguments
    ///
    /// * `product` - Product to recompute
    /// * `now` - Timestamp recorded as the balance's `last_updated`
    ///
    /// # Returns
    ///
    /// The balance as written
    pub fn recompute(&self, product: &str, now: Timestamp) -> Result<Balance, LedgerError> {
        let current_stock = self.derive(product)?;
        let balance = Balance {
            product: product.to_string(),
            current_stock,
            last_updated: now,
        };
        self.write(&balance)?;
        debug!(product, current_stock, "balance recomputed");
        Ok(balance)
    }

    /// Recompute every balance and report the ones that were wrong
    ///
    /// Covers every product with movements and every product with a stored
    /// balance row. Rows that already match the ledger are left untouched,
    /// keeping their `last_updated`.
    pub fn reconcile_all(&self, now: Timestamp) -> Result<ReconcileReport, LedgerError> {
        let query = QueryLayer::new(self.conn);

        let mut products = LedgerStore::new(self.conn).products()?;
        for balance in query.list_balances(BalanceFilter::All)? {
            if !products.contains(&balance.product) {
                products.push(balance.product);
            }
        }

        let mut report = ReconcileReport::default();
        for product in products {
            report.checked += 1;
            let previous = query.balance(&product)?.map(|b| b.current_stock);
            let current = self.derive(&product)?;
            if previous == Some(current) {
                continue;
            }

            self.write(&Balance {
                product: product.clone(),
                current_stock: current,
                last_updated: now,
            })?;
            warn!(
                product = product.as_str(),
                ?previous,
                current,
                "balance disagreed with ledger; repaired"
            );
            report.repaired.push(BalanceRepair {
                product,
                previous,
                current,
            });
        }

        Ok(report)
    }

    fn write(&self, balance: &Balance) -> Result<(), LedgerError> {
        self.conn.execute(
            "INSERT INTO balanced_stock (product, current_stock, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(product) DO UPDATE SET
               current_stock = excluded.current_stock,
               updated_at = excluded.updated_at",
            params![balance.product, balance.current_stock, balance.last_updated],
        )?;
        Ok(())
    }
}
