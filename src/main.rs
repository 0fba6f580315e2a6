//! Knapsack CLI

use std::process;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

mod cli;

/// Knapsack CLI entry point
pub fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.logging.init() {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for logging errors"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    if let Err(error) = cli.run() {
        error!(%error, "knapsack failed");

        process::exit(1);
    }
}
