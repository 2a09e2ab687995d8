use crate::config::{LedgerConfig, DEFAULT_DATABASE_PATH, DEFAULT_UTC_OFFSET_HOURS};
use crate::core::catalog::{Catalog, CatalogPolicy};
use crate::io::DEFAULT_EXPORT_DIR;
use crate::types::LedgerError;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Record stock movements and track per-product balances
#[derive(Parser, Debug)]
#[command(name = "stock-ledger")]
#[command(about = "Record stock movements and track per-product balances", long_about = None)]
pub struct CliArgs {
    /// SQLite database file
    #[arg(
        long = "database",
        value_name = "PATH",
        global = true,
        default_value = DEFAULT_DATABASE_PATH,
        help = "Path to the SQLite database file"
    )]
    pub database: PathBuf,

    /// Directory for CSV exports
    #[arg(
        long = "export-dir",
        value_name = "DIR",
        global = true,
        default_value = DEFAULT_EXPORT_DIR,
        help = "Directory where exported CSV files are written"
    )]
    pub export_dir: PathBuf,

    /// Catalog CSV file with a `product` column
    #[arg(
        long = "catalog",
        value_name = "CSV",
        global = true,
        help = "Catalog CSV with a 'product' header (default: built-in list)"
    )]
    pub catalog: Option<PathBuf>,

    /// How products outside the catalog are treated
    #[arg(
        long = "catalog-policy",
        value_name = "POLICY",
        value_enum,
        global = true,
        default_value = "strict",
        help = "'strict' rejects unknown products, 'open' accepts any name"
    )]
    pub catalog_policy: CatalogPolicy,

    /// UTC offset of recorded timestamps, in hours
    #[arg(
        long = "utc-offset-hours",
        value_name = "HOURS",
        global = true,
        allow_hyphen_values = true,
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        help = "UTC offset used for timestamps, in whole hours"
    )]
    pub utc_offset_hours: i32,

    /// Skip the balance reconciliation done when the store is opened
    #[arg(long = "no-reconcile-on-open", global = true)]
    pub no_reconcile_on_open: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Ledger operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record incoming stock
    Add {
        /// Product name
        product: String,
        /// Units received
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Record outgoing stock
    Remove {
        /// Product name
        product: String,
        /// Units taken out
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Show current balances
    Balances {
        /// Include products whose balance is zero
        #[arg(long)]
        all: bool,
    },
    /// Show movements, newest first
    Transactions {
        /// Show only the most recent N movements
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Show one product's movements, oldest first
    History {
        /// Product name
        product: String,
    },
    /// Export all movements to a timestamped CSV file
    Export,
    /// Recompute every balance from the ledger
    Reconcile,
    /// List the catalog
    Products,
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// Loads the catalog file when one is given, otherwise uses the
    /// built-in product list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the catalog cannot be read or the UTC
    /// offset is out of range.
    pub fn to_ledger_config(&self) -> Result<LedgerConfig, LedgerError> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::from_csv_path(path, self.catalog_policy)?,
            None => Catalog::builtin(self.catalog_policy),
        };

        LedgerConfig::new(self.database.clone(), self.export_dir.clone(), catalog)
            .with_utc_offset_hours(self.utc_offset_hours)
            .map(|config| config.with_reconcile_on_open(!self.no_reconcile_on_open))
    }
}
