//! Command dispatch
//!
//! Maps each subcommand onto one `InventoryLedger` operation and renders
//! the result to the given writer. Listings are CSV; confirmations are one
//! line of text.

use crate::cli::args::{CliArgs, Command};
use crate::core::engine::{InventoryLedger, Recorded};
use crate::core::ReconcileReport;
use crate::io::{write_balances_csv, write_transactions_csv};
use crate::types::{BalanceFilter, LedgerError};
use std::io::Write;

/// Build the configuration, open the ledger, and run the requested command
///
/// `products` only needs the catalog and does not open the store.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let config = args.to_ledger_config()?;

    if args.command == Command::Products {
        for product in config.catalog.products() {
            writeln!(output, "{}", product)?;
        }
        return Ok(());
    }

    let mut ledger = InventoryLedger::open(&config)?;
    execute(&mut ledger, &args.command, output)
}

/// Run one command against an open ledger
pub fn execute(
    ledger: &mut InventoryLedger,
    command: &Command,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match command {
        Command::Add { product, quantity } => {
            let recorded = ledger.add_stock(product, quantity)?;
            write_recorded(&recorded, output)
        }
        Command::Remove { product, quantity } => {
            let recorded = ledger.remove_stock(product, quantity)?;
            write_recorded(&recorded, output)
        }
        Command::Balances { all } => {
            let filter = if *all {
                BalanceFilter::All
            } else {
                BalanceFilter::NonZero
            };
            write_balances_csv(&ledger.list_balances(filter)?, output)
        }
        Command::Transactions { limit } => {
            let records = match limit {
                Some(limit) => ledger.recent_transactions(*limit)?,
                None => ledger.list_transactions()?,
            };
            write_transactions_csv(&records, output)
        }
        Command::History { product } => write_transactions_csv(&ledger.history(product)?, output),
        Command::Export => {
            let path = ledger.export_transactions()?;
            writeln!(output, "Exported {}", path.display())?;
            Ok(())
        }
        Command::Reconcile => {
            let report = ledger.reconcile()?;
            write_report(&report, output)
        }
        Command::Products => {
            for product in ledger.catalog().products() {
                writeln!(output, "{}", product)?;
            }
            Ok(())
        }
    }
}

fn write_recorded(recorded: &Recorded, output: &mut dyn Write) -> Result<(), LedgerError> {
    writeln!(
        output,
        "{} of {} for '{}' recorded; balance is now {}",
        recorded.movement.direction,
        recorded.movement.quantity,
        recorded.movement.product,
        recorded.balance.current_stock
    )?;
    Ok(())
}

fn write_report(report: &ReconcileReport, output: &mut dyn Write) -> Result<(), LedgerError> {
    writeln!(
        output,
        "Checked {} products, repaired {}",
        report.checked,
        report.repaired.len()
    )?;
    for repair in &report.repaired {
        let previous = repair
            .previous
            .map(|value| value.to_string())
            .unwrap_or_else(|| "missing".to_string());
        writeln!(output, "{}: {} -> {}", repair.product, previous, repair.current)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Catalog, CatalogPolicy};
    use crate::core::traits::ManualClock;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn ledger(export_dir: PathBuf) -> InventoryLedger {
        let clock = ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 9, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
        );
        let catalog = Catalog::new(["A", "B"], CatalogPolicy::Strict).unwrap();
        InventoryLedger::in_memory(catalog, Box::new(clock), export_dir).unwrap()
    }

    fn run_command(ledger: &mut InventoryLedger, command: Command) -> Result<String, LedgerError> {
        let mut output = Vec::new();
        execute(ledger, &command, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn add(product: &str, quantity: &str) -> Command {
        Command::Add {
            product: product.to_string(),
            quantity: quantity.to_string(),
        }
    }

    fn remove(product: &str, quantity: &str) -> Command {
        Command::Remove {
            product: product.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_add_and_remove_report_balance() {
        let mut ledger = ledger(PathBuf::from("unused"));

        let out = run_command(&mut ledger, add("A", "10")).unwrap();
        assert_eq!(out, "Entrada of 10 for 'A' recorded; balance is now 10\n");

        let out = run_command(&mut ledger, remove("A", "13")).unwrap();
        assert_eq!(out, "Saída of 13 for 'A' recorded; balance is now -3\n");
    }

    #[test]
    fn test_balances_listing() {
        let mut ledger = ledger(PathBuf::from("unused"));
        run_command(&mut ledger, add("B", "2")).unwrap();
        run_command(&mut ledger, add("A", "1")).unwrap();
        run_command(&mut ledger, remove("A", "1")).unwrap();

        let out = run_command(&mut ledger, Command::Balances { all: false }).unwrap();
        assert_eq!(out, "Produto,Saldo\nB,2\n");

        let out = run_command(&mut ledger, Command::Balances { all: true }).unwrap();
        assert_eq!(out, "Produto,Saldo\nA,0\nB,2\n");
    }

    #[test]
    fn test_transactions_with_limit() {
        let mut ledger = ledger(PathBuf::from("unused"));
        run_command(&mut ledger, add("A", "5")).unwrap();
        run_command(&mut ledger, add("A", "6")).unwrap();

        let out = run_command(&mut ledger, Command::Transactions { limit: Some(1) }).unwrap();
        assert_eq!(
            out,
            "Produto,Quantidade,Data,Tipo\nA,6,2024-09-01 14:30:00,Entrada\n"
        );
    }

    #[test]
    fn test_validation_error_is_returned() {
        let mut ledger = ledger(PathBuf::from("unused"));
        let err = run_command(&mut ledger, add("A", "zero")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_export_prints_path() {
        let temp = tempdir().unwrap();
        let mut ledger = ledger(temp.path().to_path_buf());
        run_command(&mut ledger, add("A", "1")).unwrap();

        let out = run_command(&mut ledger, Command::Export).unwrap();
        let expected = temp.path().join("stock_20240901_1430.csv");
        assert_eq!(out, format!("Exported {}\n", expected.display()));
        assert!(expected.exists());
    }

    #[test]
    fn test_reconcile_on_clean_ledger() {
        let mut ledger = ledger(PathBuf::from("unused"));
        run_command(&mut ledger, add("A", "1")).unwrap();

        let out = run_command(&mut ledger, Command::Reconcile).unwrap();
        assert_eq!(out, "Checked 1 products, repaired 0\n");
    }

    #[test]
    fn test_run_products_without_store() {
        let temp = tempdir().unwrap();
        let db = temp.path().join("never-created.db");
        let args = CliArgs::try_parse_from([
            "stock-ledger",
            "--database",
            db.to_str().unwrap(),
            "products",
        ])
        .unwrap();

        let mut output = Vec::new();
        run(&args, &mut output).unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.lines().any(|line| line == "Tecido Calandrado Camaçari"));
        assert!(!db.exists());
    }

    #[test]
    fn test_run_against_database_file() {
        let temp = tempdir().unwrap();
        let db = temp.path().join("stock.db");
        let db = db.to_str().unwrap();

        for argv in [
            vec!["stock-ledger", "--database", db, "add", "9 10-16", "4"],
            vec!["stock-ledger", "--database", db, "remove", "9 10-16", "1"],
        ] {
            let args = CliArgs::try_parse_from(argv).unwrap();
            run(&args, &mut Vec::new()).unwrap();
        }

        let args = CliArgs::try_parse_from(["stock-ledger", "--database", db, "balances"]).unwrap();
        let mut output = Vec::new();
        run(&args, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Produto,Saldo\n9 10-16,3\n");
    }
}
