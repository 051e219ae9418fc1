//! # Collaborator Traits

use super::errors::StoreResult;
use super::record::{Record, RecordId};

/// Loads records by id
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when no record has this id
    fn load(&self, id: RecordId) -> StoreResult<Option<Record>>;
}

/// Knows which internal field ids exist
pub trait FieldCatalog: Send + Sync {
    fn has_field(&self, internal_id: &str) -> StoreResult<bool>;
}

/// "Field contains substring" condition on an internal field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCondition {
    pub field: String,
    pub substring: String,
}

impl FieldCondition {
    pub fn new(field: impl Into<String>, substring: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            substring: substring.into(),
        }
    }
}

/// Runs field queries
pub trait QueryExecutor: Send + Sync {
    /// Ids of records matching every condition (implicit AND), ascending.
    /// No conditions matches every record.
    fn find_ids(&self, conditions: &[FieldCondition]) -> StoreResult<Vec<RecordId>>;
}

/// Third-party document annotation integration
pub trait AnnotationService: Send + Sync {
    /// Annotation document URL for an attached file, if the service knows it
    fn annotation_url(&self, file_id: &str) -> Option<String>;
}
