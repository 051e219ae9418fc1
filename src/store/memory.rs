//! In-memory record store loaded from a JSON file
//!
//! File layout:
//!
//! ```json
//! {
//!   "fields": ["biblio_isbn"],
//!   "records": { "12": { "title": "Tidal flats", "biblio_year": 1999 } }
//! }
//! ```
//!
//! `fields` is optional. The catalog holds those plus every field that
//! appears in a record.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde_json::Value;

use crate::projection::value::scalar_texts;

use super::backend::{FieldCatalog, FieldCondition, QueryExecutor, RecordStore};
use super::errors::{StoreError, StoreResult};
use super::record::{Record, RecordId};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<RecordId, Record>,
    fields: BTreeSet<String>,
}

/// Record store, field catalog and query executor over in-memory records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a records file from disk.
    pub fn load_file(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let store = Self::from_value(&value)?;
        tracing::info!(path = %path.display(), records = store.len(), "records loaded");
        Ok(store)
    }

    /// Builds a store from the records file JSON.
    pub fn from_value(value: &Value) -> StoreResult<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| StoreError::Malformed("top level must be an object".to_string()))?;

        let store = Self::new();

        if let Some(fields) = root.get("fields") {
            let fields = fields
                .as_array()
                .ok_or_else(|| StoreError::Malformed("'fields' must be an array".to_string()))?;
            for field in fields {
                let name = field.as_str().ok_or_else(|| {
                    StoreError::Malformed("'fields' entries must be strings".to_string())
                })?;
                store.declare_field(name)?;
            }
        }

        if let Some(records) = root.get("records") {
            let records = records
                .as_object()
                .ok_or_else(|| StoreError::Malformed("'records' must be an object".to_string()))?;
            for (key, body) in records {
                let id: RecordId = key
                    .trim()
                    .parse()
                    .map_err(|_| StoreError::InvalidId(key.clone()))?;
                let fields = body.as_object().cloned().ok_or_else(|| {
                    StoreError::Malformed(format!("record {} must be an object", key))
                })?;
                store.insert(Record::from_fields(id, fields))?;
            }
        }

        Ok(store)
    }

    /// Adds or replaces a record; its fields join the catalog.
    pub fn insert(&self, record: Record) -> StoreResult<()> {
        let mut inner = self.write()?;
        for field in record.field_ids() {
            inner.fields.insert(field.to_string());
        }
        inner.records.insert(record.id(), record);
        Ok(())
    }

    /// Adds a field to the catalog without any record using it.
    pub fn declare_field(&self, internal_id: &str) -> StoreResult<()> {
        self.write()?.fields.insert(internal_id.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("Lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("Lock poisoned".to_string()))
    }

    /// Case-insensitive substring match against every scalar in the field.
    fn matches(record: &Record, condition: &FieldCondition) -> bool {
        let Some(raw) = record.get(&condition.field) else {
            return false;
        };
        let needle = condition.substring.to_lowercase();

        scalar_texts(raw)
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, id: RecordId) -> StoreResult<Option<Record>> {
        Ok(self.read()?.records.get(&id).cloned())
    }
}

impl FieldCatalog for MemoryStore {
    fn has_field(&self, internal_id: &str) -> StoreResult<bool> {
        Ok(self.read()?.fields.contains(internal_id))
    }
}

impl QueryExecutor for MemoryStore {
    fn find_ids(&self, conditions: &[FieldCondition]) -> StoreResult<Vec<RecordId>> {
        let inner = self.read()?;

        // BTreeMap iteration keeps ids ascending
        Ok(inner
            .records
            .values()
            .filter(|record| conditions.iter().all(|c| Self::matches(record, c)))
            .map(Record::id)
            .collect())
    }
}
