//! Observability for biblio-api
//!
//! Logging goes through `tracing`. The subscriber is installed once at
//! startup by the CLI:
//! - JSON lines (one event per line) or human-readable text
//! - level filter from `RUST_LOG`, falling back to the configured default

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
