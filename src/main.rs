//! biblio-api CLI entry point
//!
//! All logic is delegated to the CLI module; this only reports failures
//! and sets the exit code.

use biblio_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
