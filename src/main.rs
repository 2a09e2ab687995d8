//! Stock Ledger CLI
//!
//! Records inbound and outbound stock movements in a SQLite store and keeps
//! a per-product balance next to them.
//!
//! # Usage
//!
//! ```bash
//! stock-ledger add "9 10-16" 10
//! stock-ledger remove "9 10-16" 3
//! stock-ledger balances
//! stock-ledger transactions --limit 20
//! stock-ledger export --export-dir "Dados Estoque"
//! ```
//!
//! Listings are written to stdout as CSV; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Storage or export failure
//! - 2: Rejected input (bad quantity, unknown product, bad configuration)

use stock_ledger::{cli, logging};
use std::process;

fn main() {
    let args = cli::parse_args();
    logging::init(args.verbose);

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(e.kind().exit_code());
    }
}
