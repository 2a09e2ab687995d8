//! Wall-clock timestamps for ledger rows
//!
//! Timestamps are naive date-times in the ledger's configured UTC offset,
//! truncated to microseconds. They are stored as fixed-width text so that
//! SQLite's lexical ordering of the `updated_at` column equals time order.

use chrono::{NaiveDateTime, SubsecRound};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;

/// Format written to the `updated_at` columns
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format accepted when reading `updated_at` back (fraction optional)
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Human-facing format used in listings and exports
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the stamp embedded in export file names
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Wrap a naive date-time, dropping sub-microsecond precision
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Timestamp(value.trunc_subsecs(6))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn to_storage_string(&self) -> String {
        self.0.format(STORAGE_FORMAT).to_string()
    }

    /// Parse a value previously written with [`STORAGE_FORMAT`]
    pub fn parse_storage(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, PARSE_FORMAT).map(Self::from_naive)
    }

    pub fn file_stamp(&self) -> String {
        self.0.format(FILE_STAMP_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::from_naive(value)
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_storage_string()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Timestamp::parse_storage(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
