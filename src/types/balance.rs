//! Balance-related types for the stock ledger
//!
//! A [`Balance`] is the materialized net stock of one product. It is a
//! cache over the movement history and is always recomputed in full from
//! that history.

use super::timestamp::Timestamp;

/// Materialized stock level of one product
///
/// Represents `sum(inbound) - sum(outbound)` for the product as of the
/// last recompute. There is exactly one balance per product that has ever
/// had a movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// Product name (unique key)
    pub product: String,

    /// Net units on hand
    ///
    /// May be negative: nothing prevents outflows from exceeding inflows.
    pub current_stock: i64,

    /// Time of the recompute that produced this value
    pub last_updated: Timestamp,
}

impl Balance {
    pub fn is_zero(&self) -> bool {
        self.current_stock == 0
    }
}

/// Row selection for balance listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceFilter {
    /// Every product with a balance row, including zero balances
    All,
    /// Only products whose balance is not zero
    #[default]
    NonZero,
}

impl BalanceFilter {
    pub fn keeps(&self, balance: &Balance) -> bool {
        match self {
            BalanceFilter::All => true,
            BalanceFilter::NonZero => !balance.is_zero(),
        }
    }
}
