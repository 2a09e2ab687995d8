//! Movement-related types for the stock ledger
//!
//! This module defines the direction, quantity, and record types for the
//! append-only movement history.

use super::error::LedgerError;
use super::timestamp::Timestamp;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::str::FromStr;

/// Movement identifier
///
/// Assigned by the store on insert. Ids are unique within one direction's
/// table; an inbound and an outbound movement may share an id.
pub type MovementId = i64;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Stock received; increases the balance
    Inbound,
    /// Stock taken out; decreases the balance
    Outbound,
}

impl Direction {
    /// Label used in listings and in the exported `Tipo` column
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Inbound => "Entrada",
            Direction::Outbound => "Saída",
        }
    }

    /// Table holding movements of this direction
    pub fn table(&self) -> &'static str {
        match self {
            Direction::Inbound => "input_stock",
            Direction::Outbound => "output_stock",
        }
    }

    /// Sign applied to quantities of this direction when summing a balance
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Inbound => 1,
            Direction::Outbound => -1,
        }
    }

    /// Parse the label form back into a direction
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Entrada" => Some(Direction::Inbound),
            "Saída" => Some(Direction::Outbound),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A strictly positive number of units
///
/// Construction is the validation point for user-supplied quantities:
/// anything that is not a whole number above zero is rejected before
/// the ledger is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i64);

impl Quantity {
    /// Create a quantity, rejecting zero and negative values
    pub fn new(value: i64) -> Result<Self, LedgerError> {
        if value <= 0 {
            return Err(LedgerError::NonPositiveQuantity { quantity: value });
        }
        Ok(Quantity(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = LedgerError;

    /// Parse user text into a quantity
    ///
    /// Surrounding whitespace is ignored. Fractions, empty text, and
    /// non-numeric input are `InvalidQuantity`; zero and negatives are
    /// `NonPositiveQuantity`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| LedgerError::invalid_quantity(input))?;
        Quantity::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Quantity {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Quantity {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        Quantity::new(raw).map_err(|_| FromSqlError::OutOfRange(raw))
    }
}

/// One committed stock movement
///
/// Records are immutable once written; the ledger never updates or
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRecord {
    /// Store-assigned id, unique within the direction's table
    pub id: MovementId,

    /// Product the movement applies to
    pub product: String,

    /// Units moved
    pub quantity: Quantity,

    /// Whether stock came in or went out
    pub direction: Direction,

    /// Creation time, assigned by the ledger
    pub timestamp: Timestamp,
}

impl MovementRecord {
    /// Contribution of this movement to its product's balance
    pub fn signed_quantity(&self) -> i64 {
        self.direction.sign() * self.quantity.get()
    }
}
