//! biblio-api - field-mapped JSON endpoints for bibliographic records
//!
//! Records held by a host store are projected into public JSON documents
//! through a declarative field map, and list queries on public names are
//! translated back to internal fields.

pub mod cli;
pub mod field_map;
pub mod http_server;
pub mod observability;
pub mod projection;
pub mod rest_api;
pub mod store;
