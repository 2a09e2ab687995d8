//! CSV format handling for ledger output and catalog input
//!
//! This module centralizes all CSV format concerns, providing:
//! - ExportRow structure for the transaction export
//! - CatalogRow structure for catalog files
//! - Transaction and balance serialization
//!
//! All functions write to a caller-supplied writer (no file handling) for
//! easy testing.

use crate::types::{Balance, LedgerError, MovementRecord};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Header of the transaction export
pub const TRANSACTION_HEADER: [&str; 4] = ["Produto", "Quantidade", "Data", "Tipo"];

/// Header of the balance listing
pub const BALANCE_HEADER: [&str; 2] = ["Produto", "Saldo"];

/// One exported movement
///
/// Columns: Produto, Quantidade, Data, Tipo
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportRow {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Quantidade")]
    pub quantity: i64,
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Tipo")]
    pub direction: String,
}

impl From<&MovementRecord> for ExportRow {
    fn from(record: &MovementRecord) -> Self {
        ExportRow {
            product: record.product.clone(),
            quantity: record.quantity.get(),
            date: record.timestamp.to_string(),
            direction: record.direction.label().to_string(),
        }
    }
}

/// One row of a catalog file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogRow {
    pub product: String,
}

/// Write movements as CSV with the export header
///
/// Rows are written in the order given. The header is written even when
/// there are no movements.
pub fn write_transactions_csv(
    records: &[MovementRecord],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(TRANSACTION_HEADER)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// Write balances as CSV with columns Produto, Saldo
pub fn write_balances_csv(balances: &[Balance], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(BALANCE_HEADER)?;
    for balance in balances {
        let stock = balance.current_stock.to_string();
        writer.write_record([balance.product.as_str(), stock.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
