//! Core traits for the stock ledger
//!
//! The ledger never reads the system time directly. Every timestamp it
//! assigns comes from a [`Clock`], so the same code path serves the CLI
//! (wall-clock time in the configured offset) and tests (pinned time).

use crate::types::Timestamp;
use chrono::{Duration, FixedOffset, NaiveDateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of timestamps for new movements, balances, and export names
pub trait Clock {
    /// Current wall-clock time
    fn now(&self) -> Timestamp;
}

/// Wall-clock time in a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        SystemClock { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().with_timezone(&self.offset).naive_local().into()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle while the
/// ledger owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        ManualClock {
            current: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, value: NaiveDateTime) {
        self.current.set(value);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.current.get().into()
    }
}
