// CLI module
// Command-line interface, argument parsing, and command dispatch

mod args;
mod commands;

pub use args::{CliArgs, Command};
pub use commands::{execute, run};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments, missing subcommand, or
/// --help flag), clap displays an error message or help text and exits
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
