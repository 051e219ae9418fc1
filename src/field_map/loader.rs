//! Loads the field map JSON file at startup
//!
//! A missing or malformed file is fatal: the service never starts with a
//! partial mapping.

use std::fs;
use std::path::Path;

use super::errors::{FieldMapError, FieldMapResult};
use super::types::{FieldMap, RawFieldMap};

/// Reads and validates field map files.
pub struct FieldMapLoader;

impl FieldMapLoader {
    /// Loads a field map from disk.
    pub fn load(path: &Path) -> FieldMapResult<FieldMap> {
        let content = fs::read_to_string(path).map_err(|e| FieldMapError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses field map JSON; `origin` only labels errors.
    pub fn parse(content: &str, origin: &str) -> FieldMapResult<FieldMap> {
        let raw: RawFieldMap = serde_json::from_str(content).map_err(|e| FieldMapError::Json {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let map = FieldMap::from_raw(raw)?;

        tracing::debug!(
            origin,
            sections = map.sections().len(),
            fields = map.field_count(),
            "field map loaded"
        );

        Ok(map)
    }
}
