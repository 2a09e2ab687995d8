//! Append-only movement storage
//!
//! This module provides the `LedgerStore` that writes inbound and outbound
//! movements to their tables and answers the per-product aggregate queries
//! the balance materializer needs.
//!
//! The store borrows a connection rather than owning one. Passing a
//! `rusqlite::Transaction` (which derefs to `Connection`) makes every call
//! part of that transaction.
//!
//! # Immutability
//!
//! There is no update or delete. Once a movement is committed it is part of
//! the history forever.

use crate::types::{Direction, LedgerError, MovementRecord, Quantity, Timestamp};
use rusqlite::{params, Connection, Row};

/// Movement storage over a borrowed SQLite connection
pub struct LedgerStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> LedgerStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        LedgerStore { conn }
    }

    /// Append one movement
    ///
    /// The product name is stored as given; catalog checks happen before
    /// this call.
    ///
    /// # Returns
    ///
    /// The stored record with its assigned id
    pub fn append(
        &self,
        product: &str,
        quantity: Quantity,
        direction: Direction,
        timestamp: Timestamp,
    ) -> Result<MovementRecord, LedgerError> {
        let sql = format!(
            "INSERT INTO {} (product, quantity, updated_at) VALUES (?1, ?2, ?3)",
            direction.table()
        );
        self.conn
            .execute(&sql, params![product, quantity, timestamp])?;

        Ok(MovementRecord {
            id: self.conn.last_insert_rowid(),
            product: product.to_string(),
            quantity,
            direction,
            timestamp,
        })
    }

    /// Total quantity moved in one direction for a product
    ///
    /// Returns 0 when the product has no movements in that direction.
    pub fn total(&self, product: &str, direction: Direction) -> Result<i64, LedgerError> {
        let sql = format!(
            "SELECT COALESCE(SUM(quantity), 0) FROM {} WHERE product = ?1",
            direction.table()
        );
        let total = self
            .conn
            .query_row(&sql, params![product], |row| row.get::<_, i64>(0))?;
        Ok(total)
    }

    /// Whether the product has at least one movement in either direction
    pub fn has_movements(&self, product: &str) -> Result<bool, LedgerError> {
        let found = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM input_stock WHERE product = ?1)
                 OR EXISTS (SELECT 1 FROM output_stock WHERE product = ?1)",
            params![product],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(found)
    }

    /// All movements of one product, oldest first
    pub fn movements_for(&self, product: &str) -> Result<Vec<MovementRecord>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, product, quantity, updated_at, 0 AS direction
               FROM input_stock WHERE product = ?1
             UNION ALL
             SELECT id, product, quantity, updated_at, 1 AS direction
               FROM output_stock WHERE product = ?1
             ORDER BY updated_at ASC, id ASC, direction ASC",
        )?;
        let rows = stmt.query_map(params![product], movement_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every product that appears in either movement table, sorted
    pub fn products(&self) -> Result<Vec<String>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT product FROM input_stock
             UNION
             SELECT product FROM output_stock
             ORDER BY product ASC",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of stored movements across both directions
    pub fn count(&self) -> Result<u64, LedgerError> {
        let count = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM input_stock) + (SELECT COUNT(*) FROM output_stock)",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count as u64)
    }
}

/// Map a `(id, product, quantity, updated_at, direction)` row to a record
///
/// `direction` is 0 for inbound and 1 for outbound.
pub(crate) fn movement_from_row(row: &Row<'_>) -> rusqlite::Result<MovementRecord> {
    let direction = match row.get::<_, i64>(4)? {
        0 => Direction::Inbound,
        _ => Direction::Outbound,
    };
    Ok(MovementRecord {
        id: row.get(0)?,
        product: row.get(1)?,
        quantity: row.get(2)?,
        direction,
        timestamp: row.get(3)?,
    })
}
