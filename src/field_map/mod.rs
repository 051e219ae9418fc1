//! Field map: internal field ids to public JSON names
//!
//! The map is grouped by section ("record", "document", ...) and is used in
//! both directions:
//! - internal -> public when a record is projected
//! - public -> internal when list query parameters are validated

mod errors;
mod loader;
mod types;

pub use errors::{FieldMapError, FieldMapResult};
pub use loader::FieldMapLoader;
pub use types::{FieldMap, Section};
