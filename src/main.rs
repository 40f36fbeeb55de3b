//! stratodb CLI entry point
//!
//! A minimal entrypoint that:
//! 1. Dispatches to CLI commands (via cli::run)
//! 2. Prints errors to stderr
//! 3. Exits with non-zero on failure
//!
//! main.rs must NOT load configuration, touch the catalog, or perform
//! resolution itself. All logic is delegated to the CLI module.

use stratodb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
