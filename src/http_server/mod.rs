//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/documents/:id` - Single projected record
//! - `/documents` - Matching record ids

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
