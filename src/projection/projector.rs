//! Record projector
//!
//! The field map is compiled once into a flat list of accessors. Projecting
//! a record walks that list, runs each raw value through `project_field`
//! and post-processes the fields whose accessor carries a rule.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::field_map::{FieldMap, Section};
use crate::store::Record;

use super::rules::{PostProcessor, PostRule};
use super::value::normalize;

/// Projects one field through a section's mapping.
///
/// Returns `None` when the field is unmapped or its value is empty.
/// Post-processing is not applied here.
pub fn project_field(section: &Section, internal_id: &str, raw: &Value) -> Option<(String, Value)> {
    let public_name = section.public_name(internal_id)?;
    let value = normalize(raw)?;
    Some((public_name.to_string(), value))
}

/// Reads one internal field and emits it under its public name.
#[derive(Debug, Clone)]
pub struct FieldAccessor {
    pub section: String,
    pub internal_id: String,
    pub public_name: String,
    pub rule: Option<PostRule>,
}

/// Public document grouped by section. Sections appear only once they hold
/// at least one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectedDocument {
    sections: Map<String, Value>,
}

impl ProjectedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `section.public_name`, replacing any previous value.
    pub fn insert(&mut self, section: &str, public_name: &str, value: Value) {
        let entry = self
            .sections
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if let Value::Object(fields) = entry {
            fields.insert(public_name.to_string(), value);
        }
    }

    pub fn get(&self, section: &str, public_name: &str) -> Option<&Value> {
        self.sections.get(section)?.get(public_name)
    }

    pub fn section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.sections.get(section)?.as_object()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.sections
    }
}

/// Compiled projection of records into public documents.
#[derive(Debug, Clone)]
pub struct Projector {
    field_map: FieldMap,
    accessors: Vec<FieldAccessor>,
    post: PostProcessor,
}

impl Projector {
    pub fn new(field_map: &FieldMap, post: PostProcessor) -> Self {
        let mut accessors = Vec::with_capacity(field_map.field_count());

        for section in field_map.sections() {
            for (internal, public) in section.entries() {
                accessors.push(FieldAccessor {
                    section: section.name().to_string(),
                    internal_id: internal.to_string(),
                    public_name: public.to_string(),
                    rule: post.rule_for(public),
                });
            }
        }

        Self {
            field_map: field_map.clone(),
            accessors,
            post,
        }
    }

    pub fn accessors(&self) -> &[FieldAccessor] {
        &self.accessors
    }

    pub fn post_processor(&self) -> &PostProcessor {
        &self.post
    }

    /// Projects every mapped field of a record.
    pub fn project(&self, record: &Record) -> ProjectedDocument {
        let mut document = ProjectedDocument::new();

        for accessor in &self.accessors {
            let Some(raw) = record.get(&accessor.internal_id) else {
                continue;
            };
            let Some(section) = self.field_map.section(&accessor.section) else {
                continue;
            };
            let Some((public_name, value)) = project_field(section, &accessor.internal_id, raw)
            else {
                continue;
            };

            let value = if accessor.rule.is_some() {
                self.post.apply_post_processing(&public_name, value)
            } else {
                value
            };

            document.insert(section.name(), &public_name, value);
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::LinkBuilder;
    use serde_json::json;

    fn field_map() -> FieldMap {
        FieldMap::from_value(&json!({
            "record": {
                "bid": "id",
                "created": "created"
            },
            "document": {
                "title": "title",
                "biblio_keywords": "keywords",
                "biblio_abst_e": "abstract"
            }
        }))
        .unwrap()
    }

    fn projector() -> Projector {
        Projector::new(
            &field_map(),
            PostProcessor::with_defaults(LinkBuilder::new("library.example.org")),
        )
    }

    #[test]
    fn test_project_field_unmapped() {
        let map = field_map();
        let section = map.section("document").unwrap();
        assert_eq!(project_field(section, "bid", &json!(1)), None);
    }

    #[test]
    fn test_project_field_empty() {
        let map = field_map();
        let section = map.section("document").unwrap();
        assert_eq!(project_field(section, "title", &json!("")), None);
    }

    #[test]
    fn test_project_field_scalar() {
        let map = field_map();
        let section = map.section("document").unwrap();
        assert_eq!(
            project_field(section, "title", &json!("Tidal flats")),
            Some(("title".to_string(), json!("Tidal flats")))
        );
    }

    #[test]
    fn test_project_record() {
        let record = Record::new(12)
            .with_field("bid", json!(12))
            .with_field("created", json!(915216645))
            .with_field("title", json!("Tidal flats"))
            .with_field("biblio_abst_e", json!({"value": null}))
            .with_field("unmapped", json!("ignored"));

        let doc = projector().project(&record);

        assert_eq!(
            doc.get("record", "id"),
            Some(&json!("http://library.example.org/documents/12"))
        );
        assert_eq!(
            doc.get("record", "created"),
            Some(&json!("1999-01-01T18:50:45+00:00"))
        );
        assert_eq!(doc.get("document", "title"), Some(&json!("Tidal flats")));
        assert_eq!(doc.get("document", "abstract"), None);
        assert_eq!(doc.section("document").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let record = Record::new(3).with_field("title", json!("Only title"));
        let doc = projector().project(&record);
        assert!(doc.section("record").is_none());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"document": {"title": "Only title"}})
        );
    }

    #[test]
    fn test_project_matches_field_by_field() {
        let record = Record::new(5)
            .with_field("created", json!("0"))
            .with_field(
                "biblio_keywords",
                json!([{"vocabulary_machine_name": "k", "name": "delta"}]),
            );
        let projector = projector();
        let map = field_map();
        let doc = projector.project(&record);

        for accessor in projector.accessors() {
            let section = map.section(&accessor.section).unwrap();
            let expected = record
                .get(&accessor.internal_id)
                .and_then(|raw| project_field(section, &accessor.internal_id, raw))
                .map(|(name, value)| projector.post_processor().apply_post_processing(&name, value));
            assert_eq!(doc.get(&accessor.section, &accessor.public_name), expected.as_ref());
        }
    }

    #[test]
    fn test_accessors_follow_map_order() {
        let names: Vec<_> = projector()
            .accessors()
            .iter()
            .map(|a| a.public_name.clone())
            .collect();
        assert_eq!(names, vec!["id", "created", "title", "keywords", "abstract"]);
    }
}
