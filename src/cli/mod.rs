//! CLI module for biblio-api
//!
//! Provides command-line interface for:
//! - serve: load config, field map and records, then run the HTTP server
//! - show: print one projected record
//! - check-map: validate the field map

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_state, check_map, run, run_command, serve, show};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
