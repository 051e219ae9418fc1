//! Derived fields for single-record output
//!
//! These are not in the field map; they are computed from a record:
//! - creator ids: contributor entities -> creator URLs
//! - identifier: DOI when present, otherwise the local document URL
//! - annotation URL: attached file id resolved through the annotation service

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{AnnotationService, Record};

use super::links::LinkBuilder;
use super::projector::ProjectedDocument;
use super::value::{scalar_text, unbox_scalar, Contributor};

/// File entity id inside an attachment entry
const FILE_ID_KEY: &str = "fid";

/// Where derived fields come from and where they go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// Section the derived fields are written to
    #[serde(default = "default_section")]
    pub section: String,

    /// Internal field holding contributor entities
    #[serde(default = "default_creator_field")]
    pub creator_field: String,

    #[serde(default = "default_creator_ids_name")]
    pub creator_ids_name: String,

    /// Internal field holding the DOI
    #[serde(default = "default_doi_field")]
    pub doi_field: String,

    #[serde(default = "default_identifier_name")]
    pub identifier_name: String,

    /// Internal field holding the attached file
    #[serde(default = "default_file_field")]
    pub file_field: String,

    #[serde(default = "default_annotation_name")]
    pub annotation_name: String,
}

fn default_section() -> String {
    "document".to_string()
}

fn default_creator_field() -> String {
    "biblio_contributors".to_string()
}

fn default_creator_ids_name() -> String {
    "creatorIds".to_string()
}

fn default_doi_field() -> String {
    "biblio_doi".to_string()
}

fn default_identifier_name() -> String {
    "identifier".to_string()
}

fn default_file_field() -> String {
    "field_attachment".to_string()
}

fn default_annotation_name() -> String {
    "annotationUrl".to_string()
}

impl Default for DerivedFields {
    fn default() -> Self {
        Self {
            section: default_section(),
            creator_field: default_creator_field(),
            creator_ids_name: default_creator_ids_name(),
            doi_field: default_doi_field(),
            identifier_name: default_identifier_name(),
            file_field: default_file_field(),
            annotation_name: default_annotation_name(),
        }
    }
}

impl DerivedFields {
    /// Merges every derived field that has a value into `document`.
    pub fn apply(
        &self,
        document: &mut ProjectedDocument,
        record: &Record,
        links: &LinkBuilder,
        annotation: Option<&dyn AnnotationService>,
    ) {
        if let Some(ids) = self.creator_ids(record, links) {
            document.insert(&self.section, &self.creator_ids_name, ids);
        }

        document.insert(
            &self.section,
            &self.identifier_name,
            Value::String(self.identifier(record, links)),
        );

        if let Some(url) = annotation.and_then(|service| self.annotation_url(record, service)) {
            document.insert(&self.section, &self.annotation_name, Value::String(url));
        }
    }

    /// Creator URLs for contributors that carry an id, in entry order.
    pub fn creator_ids(&self, record: &Record, links: &LinkBuilder) -> Option<Value> {
        let raw = record.get(&self.creator_field)?;

        let ids: Vec<Value> = Contributor::collect(raw)
            .into_iter()
            .filter_map(|c| c.cid)
            .map(|cid| Value::String(links.creator_url(&cid)))
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(Value::Array(ids))
        }
    }

    /// DOI resolver URL if the record has one, else the local document URL.
    pub fn identifier(&self, record: &Record, links: &LinkBuilder) -> String {
        record
            .get(&self.doi_field)
            .and_then(unbox_scalar)
            .and_then(|v| scalar_text(&v))
            .filter(|doi| !doi.trim().is_empty())
            .map(|doi| LinkBuilder::doi_url(&doi))
            .unwrap_or_else(|| links.document_url(&record.id().to_string()))
    }

    /// Id of the attached file: a scalar, a boxed scalar, or the first
    /// entry's `fid`.
    pub fn attached_file_id(&self, record: &Record) -> Option<String> {
        let raw = record.get(&self.file_field)?;

        let file = match raw {
            Value::Array(items) => items.first()?,
            other => other,
        };

        let id = match file {
            Value::Object(obj) if obj.contains_key(FILE_ID_KEY) => unbox_scalar(&obj[FILE_ID_KEY]),
            other => unbox_scalar(other),
        }?;

        scalar_text(&id)
    }

    pub fn annotation_url(&self, record: &Record, service: &dyn AnnotationService) -> Option<String> {
        let file_id = self.attached_file_id(record)?;
        let url = service.annotation_url(&file_id);

        if url.is_none() {
            tracing::debug!(record = record.id(), file_id = %file_id, "no annotation document for file");
        }
        url
    }
}
