//! Transaction export to timestamped CSV files
//!
//! Files are named `stock_<YYYYMMDD_HHMM>.csv` inside the export directory,
//! which is created on demand. A second export within the same minute
//! replaces the first.

use crate::io::csv_format::write_transactions_csv;
use crate::types::{LedgerError, MovementRecord, Timestamp};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory used when none is configured
pub const DEFAULT_EXPORT_DIR: &str = "Dados Estoque";

/// Path of the export file for a given moment
pub fn export_path(dir: &Path, at: Timestamp) -> PathBuf {
    dir.join(format!("stock_{}.csv", at.file_stamp()))
}

/// Write movements to a new export file
///
/// # Arguments
///
/// * `records` - Movements to export, in output order
/// * `dir` - Export directory; created with its parents if absent
/// * `at` - Moment used for the file name
///
/// # Returns
///
/// The path of the written file
///
/// # Errors
///
/// Returns `LedgerError::Export` if the directory cannot be created or the
/// file cannot be written. The ledger itself is never touched.
pub fn export_transactions(
    records: &[MovementRecord],
    dir: &Path,
    at: Timestamp,
) -> Result<PathBuf, LedgerError> {
    fs::create_dir_all(dir).map_err(|e| LedgerError::export(dir, e))?;

    let path = export_path(dir, at);
    let file = File::create(&path).map_err(|e| LedgerError::export(&path, e))?;
    let mut writer = BufWriter::new(file);

    write_transactions_csv(records, &mut writer).map_err(|e| LedgerError::export(&path, e))?;
    writer.flush().map_err(|e| LedgerError::export(&path, e))?;

    info!(path = %path.display(), rows = records.len(), "transactions exported");
    Ok(path)
}
