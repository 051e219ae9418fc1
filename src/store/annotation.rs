//! Static annotation index
//!
//! Maps attached file ids to documents in the annotation service and builds
//! their URLs. Stands in for a live integration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::backend::AnnotationService;

/// Annotation service settings, as found in the service config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// URL prefix of annotation documents
    pub base_url: String,

    /// File id -> annotation document id
    #[serde(default)]
    pub documents: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct StaticAnnotationIndex {
    base_url: String,
    documents: HashMap<String, String>,
}

impl StaticAnnotationIndex {
    pub fn new(base_url: impl Into<String>, documents: HashMap<String, String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            documents,
        }
    }

    pub fn from_config(config: &AnnotationConfig) -> Self {
        Self::new(config.base_url.clone(), config.documents.clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl AnnotationService for StaticAnnotationIndex {
    fn annotation_url(&self, file_id: &str) -> Option<String> {
        self.documents
            .get(file_id)
            .map(|doc| format!("{}/{}", self.base_url, doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let config: AnnotationConfig = serde_json::from_str(
            r#"{"base_url": "https://annotate.example.com/documents/", "documents": {"12": "Zx81"}}"#,
        )
        .unwrap();
        let index = StaticAnnotationIndex::from_config(&config);

        assert_eq!(
            index.annotation_url("12").as_deref(),
            Some("https://annotate.example.com/documents/Zx81")
        );
        assert_eq!(index.annotation_url("13"), None);
    }
}
