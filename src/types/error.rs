//! Error types for the stock ledger
//!
//! This module defines all error types that can occur while recording
//! movements, recomputing balances, querying, or exporting.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: bad quantity, no product selected, unknown product, bad config
//! - **Storage Errors**: the SQLite store could not be opened, read, or written
//! - **Export Errors**: the export directory or file could not be written

use std::fmt;
use thiserror::Error;

/// Broad classification of a [`LedgerError`]
///
/// Callers use this to decide how to surface an error: validation problems
/// are recoverable warnings, storage and export problems are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input; nothing was written
    Validation,
    /// The underlying store failed; not recovered
    Storage,
    /// The export file or its directory could not be written; ledger unaffected
    ExportIo,
}

impl ErrorKind {
    /// Process exit status for an error of this kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Validation => 2,
            ErrorKind::Storage | ErrorKind::ExportIo => 1,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Storage => "storage",
            ErrorKind::ExportIo => "export",
        };
        f.write_str(label)
    }
}

/// Main error type for the stock ledger
///
/// Each variant includes relevant context to help diagnose and resolve
/// the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Quantity text could not be parsed as an integer
    #[error("Invalid quantity '{input}': expected a whole number")]
    InvalidQuantity {
        /// The raw input that failed to parse
        input: String,
    },

    /// Quantity parsed but is zero or negative
    #[error("Quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The rejected value
        quantity: i64,
    },

    /// Recording the quantity would push the product's running total past `i64::MAX`
    #[error("Quantity {quantity} for '{product}' exceeds the supported total")]
    QuantityOutOfRange {
        /// Product whose total would overflow
        product: String,
        /// The rejected value
        quantity: i64,
    },

    /// No product was given (empty text or the `-` placeholder)
    #[error("No product selected")]
    NoProductSelected,

    /// Product is not part of the catalog and the catalog is strict
    #[error("Unknown product '{product}'")]
    UnknownProduct {
        /// The product name that was not found
        product: String,
    },

    /// Configuration could not be built from the given options
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// The SQLite store failed
    ///
    /// This is a fatal error; the application has no offline or retry mode.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// The export file could not be written
    #[error("Export to '{path}' failed: {message}")]
    Export {
        /// Target path of the export
        path: String,
        /// Description of the failure
        message: String,
    },

    /// I/O error outside of export (catalog file, output stream)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(error: rusqlite::Error) -> Self {
        LedgerError::Storage {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        LedgerError::Io {
            message: match line {
                Some(line) => format!("CSV error at line {}: {}", line, error),
                None => format!("CSV error: {}", error),
            },
        }
    }
}

impl LedgerError {
    /// Classify this error for reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidQuantity { .. }
            | LedgerError::NonPositiveQuantity { .. }
            | LedgerError::QuantityOutOfRange { .. }
            | LedgerError::NoProductSelected
            | LedgerError::UnknownProduct { .. }
            | LedgerError::InvalidConfig { .. } => ErrorKind::Validation,
            LedgerError::Storage { .. } => ErrorKind::Storage,
            LedgerError::Export { .. } | LedgerError::Io { .. } => ErrorKind::ExportIo,
        }
    }

    /// Whether this error came from user input rather than the environment
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(input: &str) -> Self {
        LedgerError::InvalidQuantity {
            input: input.to_string(),
        }
    }

    /// Create an UnknownProduct error
    pub fn unknown_product(product: &str) -> Self {
        LedgerError::UnknownProduct {
            product: product.to_string(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LedgerError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage {
            message: message.into(),
        }
    }

    /// Create an Export error
    pub fn export(path: &std::path::Path, error: impl fmt::Display) -> Self {
        LedgerError::Export {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::invalid_quantity(
        LedgerError::InvalidQuantity { input: "abc".to_string() },
        "Invalid quantity 'abc': expected a whole number"
    )]
    #[case::non_positive(
        LedgerError::NonPositiveQuantity { quantity: -4 },
        "Quantity must be positive, got -4"
    )]
    #[case::out_of_range(
        LedgerError::QuantityOutOfRange { product: "A".to_string(), quantity: 1 },
        "Quantity 1 for 'A' exceeds the supported total"
    )]
    #[case::no_product(LedgerError::NoProductSelected, "No product selected")]
    #[case::unknown_product(
        LedgerError::UnknownProduct { product: "Widget".to_string() },
        "Unknown product 'Widget'"
    )]
    #[case::storage(
        LedgerError::Storage { message: "disk I/O error".to_string() },
        "Storage error: disk I/O error"
    )]
    #[case::export(
        LedgerError::Export { path: "out/stock.csv".to_string(), message: "Permission denied".to_string() },
        "Export to 'out/stock.csv' failed: Permission denied"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_quantity(LedgerError::invalid_quantity("x"), ErrorKind::Validation)]
    #[case::non_positive(LedgerError::NonPositiveQuantity { quantity: 0 }, ErrorKind::Validation)]
    #[case::out_of_range(
        LedgerError::QuantityOutOfRange { product: "A".to_string(), quantity: 1 },
        ErrorKind::Validation
    )]
    #[case::no_product(LedgerError::NoProductSelected, ErrorKind::Validation)]
    #[case::unknown_product(LedgerError::unknown_product("x"), ErrorKind::Validation)]
    #[case::config(LedgerError::invalid_config("bad offset"), ErrorKind::Validation)]
    #[case::storage(LedgerError::storage("locked"), ErrorKind::Storage)]
    #[case::export(LedgerError::export(Path::new("a.csv"), "denied"), ErrorKind::ExportIo)]
    #[case::io(LedgerError::Io { message: "closed".to_string() }, ErrorKind::ExportIo)]
    fn test_error_kind(#[case] error: LedgerError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
        assert_eq!(error.is_validation(), expected == ErrorKind::Validation);
        let code = if expected == ErrorKind::Validation { 2 } else { 1 };
        assert_eq!(error.kind().exit_code(), code);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let error: LedgerError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(error.kind(), ErrorKind::Storage);
    }
}
