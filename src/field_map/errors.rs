//! # Field Map Errors

use thiserror::Error;

/// Result type for field map operations
pub type FieldMapResult<T> = Result<T, FieldMapError>;

/// Errors raised while loading a field map. All of them are fatal at startup.
#[derive(Debug, Clone, Error)]
pub enum FieldMapError {
    #[error("Failed to read field map {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid field map JSON in {path}: {message}")]
    Json { path: String, message: String },

    /// The document is valid JSON but not `{section: {internal: public}}`
    #[error("Malformed field map: {0}")]
    Shape(String),

    #[error("Duplicate {kind} '{name}' in section '{section}'")]
    Duplicate {
        section: String,
        kind: &'static str,
        name: String,
    },
}

impl FieldMapError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    pub fn duplicate_public(section: &str, name: &str) -> Self {
        Self::Duplicate {
            section: section.to_string(),
            kind: "public name",
            name: name.to_string(),
        }
    }

    pub fn duplicate_internal(section: &str, name: &str) -> Self {
        Self::Duplicate {
            section: section.to_string(),
            kind: "internal id",
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = FieldMapError::duplicate_public("document", "title");
        assert_eq!(
            err.to_string(),
            "Duplicate public name 'title' in section 'document'"
        );
    }
}
