//! Read-only projections over the ledger
//!
//! Listings for the two tables the front end shows: current balances and
//! recent movements.

use crate::core::ledger_store::movement_from_row;
use crate::types::{Balance, BalanceFilter, LedgerError, MovementRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Union of both movement tables, newest first
///
/// Ties on `updated_at` fall back to id (descending) and then direction
/// (inbound first), so repeated reads of unchanged data return the same
/// order.
const TRANSACTIONS_SQL: &str = "
    SELECT id, product, quantity, updated_at, 0 AS direction FROM input_stock
    UNION ALL
    SELECT id, product, quantity, updated_at, 1 AS direction FROM output_stock
    ORDER BY updated_at DESC, id DESC, direction ASC";

pub struct QueryLayer<'conn> {
    conn: &'conn Connection,
}

impl<'conn> QueryLayer<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        QueryLayer { conn }
    }

    /// Balance rows ordered by product name ascending
    pub fn list_balances(&self, filter: BalanceFilter) -> Result<Vec<Balance>, LedgerError> {
        let sql = match filter {
            BalanceFilter::All => {
                "SELECT product, current_stock, updated_at FROM balanced_stock ORDER BY product ASC"
            }
            BalanceFilter::NonZero => {
                "SELECT product, current_stock, updated_at FROM balanced_stock
                 WHERE current_stock != 0 ORDER BY product ASC"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], balance_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The stored balance of one product, if it has one
    pub fn balance(&self, product: &str) -> Result<Option<Balance>, LedgerError> {
        let balance = self
            .conn
            .query_row(
                "SELECT product, current_stock, updated_at FROM balanced_stock WHERE product = ?1",
                params![product],
                balance_from_row,
            )
            .optional()?;
        Ok(balance)
    }

    /// Every movement, most recent first
    pub fn list_transactions(&self) -> Result<Vec<MovementRecord>, LedgerError> {
        let mut stmt = self.conn.prepare(TRANSACTIONS_SQL)?;
        let rows = stmt.query_map([], movement_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The `limit` most recent movements, in the same order as [`Self::list_transactions`]
    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<MovementRecord>, LedgerError> {
        let sql = format!("{} LIMIT ?1", TRANSACTIONS_SQL);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], movement_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn balance_from_row(row: &Row<'_>) -> rusqlite::Result<Balance> {
    Ok(Balance {
        product: row.get(0)?,
        current_stock: row.get(1)?,
        last_updated: row.get(2)?,
    })
}
