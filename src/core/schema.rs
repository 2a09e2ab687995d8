//! SQLite schema for the ledger
//!
//! Three tables: one per movement direction and one for materialized
//! balances. Creation is idempotent; there are no migrations.

use crate::types::LedgerError;
use rusqlite::Connection;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS input_stock (
      id INTEGER PRIMARY KEY,
      product TEXT NOT NULL,
      quantity INTEGER NOT NULL,
      updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS output_stock (
      id INTEGER PRIMARY KEY,
      product TEXT NOT NULL,
      quantity INTEGER NOT NULL,
      updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS balanced_stock (
      id INTEGER PRIMARY KEY,
      product TEXT NOT NULL UNIQUE,
      current_stock INTEGER NOT NULL,
      updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_input_stock_product ON input_stock(product);
    CREATE INDEX IF NOT EXISTS idx_output_stock_product ON output_stock(product);
";

/// Create the ledger tables if they do not exist yet
pub fn ensure_schema(conn: &Connection) -> Result<(), LedgerError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
