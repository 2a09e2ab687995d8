//! Benchmark suite for ledger operations
//!
//! Measures the cost of recording movements (append plus full balance
//! recompute), reconciling, and listing, using the divan benchmarking
//! framework over in-memory stores.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! Ledgers are pre-filled with 100 or 1,000 movements spread over the
//! built-in catalog.

use divan::Bencher;
use std::path::PathBuf;
use stock_ledger::core::catalog::DEFAULT_PRODUCTS;
use stock_ledger::{
    write_transactions_csv, BalanceFilter, Catalog, CatalogPolicy, Direction, InventoryLedger,
    ManualClock, Quantity,
};

fn main() {
    divan::main();
}

fn filled_ledger(movements: usize) -> InventoryLedger {
    let clock = ManualClock::new(
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    );
    let mut ledger = InventoryLedger::in_memory(
        Catalog::builtin(CatalogPolicy::Strict),
        Box::new(clock.clone()),
        PathBuf::from("unused"),
    )
    .expect("in-memory store");

    for i in 0..movements {
        clock.advance(chrono::Duration::seconds(1));
        let product = DEFAULT_PRODUCTS[i % DEFAULT_PRODUCTS.len()];
        let direction = if i % 3 == 0 {
            Direction::Outbound
        } else {
            Direction::Inbound
        };
        let quantity = Quantity::new((i % 50 + 1) as i64).expect("positive quantity");
        ledger
            .record(product, quantity, direction)
            .expect("Recording failed");
    }
    ledger
}

/// Record one movement into a ledger that already holds N movements
#[divan::bench(args = [100, 1_000])]
fn record_movement(bencher: Bencher, movements: usize) {
    bencher
        .with_inputs(|| filled_ledger(movements))
        .bench_local_values(|mut ledger| {
            ledger
                .add_stock("9 10-16", "5")
                .expect("Recording failed");
            ledger
        });
}

/// Reconcile every balance of a ledger holding N movements
#[divan::bench(args = [100, 1_000])]
fn reconcile(bencher: Bencher, movements: usize) {
    bencher
        .with_inputs(|| filled_ledger(movements))
        .bench_local_values(|mut ledger| {
            ledger.reconcile().expect("Reconcile failed");
            ledger
        });
}

/// List and render every transaction of a ledger holding N movements
#[divan::bench(args = [100, 1_000])]
fn list_transactions(bencher: Bencher, movements: usize) {
    let ledger = filled_ledger(movements);
    bencher.bench_local(|| {
        let records = ledger.list_transactions().expect("Listing failed");
        let mut output = Vec::new();
        write_transactions_csv(&records, &mut output).expect("Rendering failed");
        output
    });
}

/// List non-zero balances of a ledger holding N movements
#[divan::bench(args = [100, 1_000])]
fn list_balances(bencher: Bencher, movements: usize) {
    let ledger = filled_ledger(movements);
    bencher.bench_local(|| {
        ledger
            .list_balances(BalanceFilter::NonZero)
            .expect("Listing failed")
    });
}
