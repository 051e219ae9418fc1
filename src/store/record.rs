//! Record type

use serde_json::{Map, Value};

/// Record identifier
pub type RecordId = u64;

/// A bibliographic record: raw values keyed by internal field id.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn from_fields(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    pub fn with_field(mut self, internal_id: impl Into<String>, value: Value) -> Self {
        self.fields.insert(internal_id.into(), value);
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, internal_id: &str) -> Option<&Value> {
        self.fields.get(internal_id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
