//! # Record Store Collaborators
//!
//! The host platform owns record storage, field definitions, field queries
//! and the annotation integration. They are reached through the traits in
//! `backend`. `MemoryStore` and `StaticAnnotationIndex` are file-backed
//! implementations used by the standalone server and the tests.

pub mod annotation;
pub mod backend;
pub mod errors;
pub mod memory;
pub mod record;

pub use annotation::{AnnotationConfig, StaticAnnotationIndex};
pub use backend::{AnnotationService, FieldCatalog, FieldCondition, QueryExecutor, RecordStore};
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::{Record, RecordId};
