//! I/O module
//!
//! Handles CSV output and export files.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (export rows, catalog rows, serialization)
//! - `export` - Timestamped export files on disk

pub mod csv_format;
pub mod export;

pub use csv_format::{write_balances_csv, write_transactions_csv, CatalogRow, ExportRow};
pub use export::{export_path, export_transactions, DEFAULT_EXPORT_DIR};
