//! CLI argument definitions using clap
//!
//! Commands:
//! - biblio-api serve --config <path>
//! - biblio-api show --config <path> --id <record id>
//! - biblio-api check-map --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// biblio-api - field-mapped JSON endpoints for bibliographic records
#[derive(Parser, Debug)]
#[command(name = "biblio-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./biblio-api.json")]
        config: PathBuf,
    },

    /// Print one projected record as the single-record endpoint would
    Show {
        /// Path to configuration file
        #[arg(long, default_value = "./biblio-api.json")]
        config: PathBuf,

        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Load and validate the field map, then print its sections
    CheckMap {
        /// Path to configuration file
        #[arg(long, default_value = "./biblio-api.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
