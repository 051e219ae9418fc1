//! # Record Projection
//!
//! Turns internal records into public documents:
//! - `value`: shape-aware normalization of raw field values
//! - `rules`: post-processing keyed by public name (dates, id URLs)
//! - `projector`: field map compiled into accessors
//! - `derived`: computed fields (creator ids, identifier, annotation URL)

pub mod derived;
pub mod links;
pub mod projector;
pub mod rules;
pub mod value;

pub use derived::DerivedFields;
pub use links::LinkBuilder;
pub use projector::{project_field, FieldAccessor, ProjectedDocument, Projector};
pub use rules::{PostProcessor, PostRule, DEFAULT_DATE_FIELDS, DEFAULT_ID_FIELD};
pub use value::{normalize, Contributor};
