//! Ledger configuration
//!
//! Everything the ledger needs at startup: where the store lives, where
//! exports go, which products exist, and which UTC offset timestamps use.

use crate::core::catalog::{Catalog, CatalogPolicy};
use crate::core::traits::SystemClock;
use crate::io::DEFAULT_EXPORT_DIR;
use crate::types::LedgerError;
use chrono::{FixedOffset, Offset, Utc};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "stock.db";

/// Offset of the wall clock the ledger records, in hours east of UTC
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
    pub catalog: Catalog,
    pub utc_offset: FixedOffset,
    /// Run a full reconciliation right after opening the store
    pub reconcile_on_open: bool,
}

impl LedgerConfig {
    pub fn new(database_path: PathBuf, export_dir: PathBuf, catalog: Catalog) -> Self {
        LedgerConfig {
            database_path,
            export_dir,
            catalog,
            utc_offset: default_offset(),
            reconcile_on_open: true,
        }
    }

    /// Set the UTC offset from whole hours
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `-23 <= hours <= 23`.
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Result<Self, LedgerError> {
        self.utc_offset = offset_from_hours(hours)?;
        Ok(self)
    }

    pub fn with_reconcile_on_open(mut self, enabled: bool) -> Self {
        self.reconcile_on_open = enabled;
        self
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.utc_offset)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig::new(
            PathBuf::from(DEFAULT_DATABASE_PATH),
            PathBuf::from(DEFAULT_EXPORT_DIR),
            Catalog::builtin(CatalogPolicy::default()),
        )
    }
}

fn default_offset() -> FixedOffset {
    offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|_| Utc.fix())
}

fn offset_from_hours(hours: i32) -> Result<FixedOffset, LedgerError> {
    if !(-23..=23).contains(&hours) {
        return Err(LedgerError::invalid_config(format!(
            "UTC offset must be between -23 and 23 hours, got {}",
            hours
        )));
    }
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| LedgerError::invalid_config(format!("invalid UTC offset {}", hours)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.database_path(), Path::new("stock.db"));
        assert_eq!(config.export_dir(), Path::new("Dados Estoque"));
        assert_eq!(config.utc_offset.local_minus_utc(), -3 * 3600);
        assert_eq!(config.catalog.policy(), CatalogPolicy::Strict);
        assert!(config.reconcile_on_open);
    }

    #[rstest]
    #[case::utc(0, 0)]
    #[case::east(5, 5 * 3600)]
    #[case::west(-8, -8 * 3600)]
    fn test_valid_offsets(#[case] hours: i32, #[case] seconds: i32) {
        let config = LedgerConfig::default().with_utc_offset_hours(hours).unwrap();
        assert_eq!(config.utc_offset.local_minus_utc(), seconds);
    }

    #[rstest]
    #[case(24)]
    #[case(-24)]
    #[case(i32::MAX)]
    fn test_invalid_offsets(#[case] hours: i32) {
        let err = LedgerConfig::default().with_utc_offset_hours(hours).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidConfig { .. }));
    }
}
