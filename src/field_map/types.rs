//! Field map types

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use super::errors::{FieldMapError, FieldMapResult};

/// One group of mappings, e.g. the "document" section.
///
/// Entries keep the order they were declared in, which is also the order
/// fields are emitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    /// (internal id, public name)
    entries: Vec<(String, String)>,
}

impl Section {
    /// Builds a section, rejecting duplicate internal ids or public names.
    pub fn new<I, K, V>(name: impl Into<String>, entries: I) -> FieldMapResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let mut seen_internal = HashSet::new();
        let mut seen_public = HashSet::new();
        let mut collected = Vec::new();

        for (internal, public) in entries {
            let internal = internal.into();
            let public = public.into();

            if !seen_internal.insert(internal.clone()) {
                return Err(FieldMapError::duplicate_internal(&name, &internal));
            }
            if !seen_public.insert(public.clone()) {
                return Err(FieldMapError::duplicate_public(&name, &public));
            }
            collected.push((internal, public));
        }

        Ok(Self {
            name,
            entries: collected,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate (internal id, public name) pairs in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(i, p)| (i.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Public name for an internal id
    pub fn public_name(&self, internal_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| i == internal_id)
            .map(|(_, p)| p.as_str())
    }

    /// Internal id for a public name
    pub fn internal_id(&self, public_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, p)| p == public_name)
            .map(|(i, _)| i.as_str())
    }
}

/// Declarative internal-id to public-name mapping, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    sections: Vec<Section>,
}

impl FieldMap {
    pub fn new(sections: Vec<Section>) -> FieldMapResult<Self> {
        let mut names = HashSet::new();
        for section in &sections {
            if !names.insert(section.name()) {
                return Err(FieldMapError::shape(format!(
                    "section '{}' declared twice",
                    section.name()
                )));
            }
        }
        Ok(Self { sections })
    }

    /// Parses `{ "<section>": { "<internal id>": "<public name>" } }`.
    ///
    /// Section and entry order follow the JSON document.
    pub fn from_value(value: &Value) -> FieldMapResult<Self> {
        let raw = RawFieldMap::deserialize(value).map_err(|e| FieldMapError::shape(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Builds the map from the document as written. Repeated keys are still
    /// present here, so duplicates are rejected instead of merged.
    pub(super) fn from_raw(raw: RawFieldMap) -> FieldMapResult<Self> {
        let mut sections = Vec::with_capacity(raw.0.len());

        for (section_name, body) in raw.0 {
            let mut entries = Vec::with_capacity(body.0.len());
            for (internal, public) in body.0 {
                let Value::String(public) = public else {
                    return Err(FieldMapError::shape(format!(
                        "'{}.{}' must map to a string",
                        section_name, internal
                    )));
                };
                entries.push((internal, public));
            }

            sections.push(Section::new(section_name, entries)?);
        }

        Self::new(sections)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Forward lookup within one section
    pub fn public_name(&self, section: &str, internal_id: &str) -> Option<&str> {
        self.section(section)?.public_name(internal_id)
    }

    /// Finds the internal id behind a public name.
    ///
    /// Sections are searched in map order and the first match wins, so a
    /// public name used in two sections resolves to the earlier one.
    pub fn reverse_lookup(&self, public_name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find_map(|s| s.internal_id(public_name))
    }

    /// Total number of mapped fields across sections
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }
}

/// Field map document as written: sections of (internal id, public name)
pub(super) type RawFieldMap = Pairs<Pairs<Value>>;

/// Key/value pairs of a JSON object in document order, repeated keys kept.
pub(super) struct Pairs<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Pairs<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for PairsVisitor<T> {
            type Value = Pairs<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry::<String, T>()? {
                    pairs.push(pair);
                }
                Ok(Pairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FieldMap {
        FieldMap::from_value(&json!({
            "record": {
                "created": "created",
                "biblio_type": "type"
            },
            "document": {
                "title": "title",
                "biblio_keywords": "keywords",
                "biblio_type_name": "type"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_preserves_section_order() {
        let map = sample();
        let names: Vec<_> = map.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["record", "document"]);
        assert_eq!(map.field_count(), 5);
    }

    #[test]
    fn test_forward_and_reverse() {
        let map = sample();
        assert_eq!(map.public_name("document", "biblio_keywords"), Some("keywords"));
        assert_eq!(map.reverse_lookup("keywords"), Some("biblio_keywords"));
        assert_eq!(map.reverse_lookup("unknownField"), None);
        assert_eq!(map.public_name("record", "title"), None);
    }

    #[test]
    fn test_cross_section_collision_first_wins() {
        let map = sample();
        assert_eq!(map.reverse_lookup("type"), Some("biblio_type"));
    }

    #[test]
    fn test_rejects_duplicate_public_name() {
        let result = FieldMap::from_value(&json!({
            "document": { "a": "title", "b": "title" }
        }));
        assert!(matches!(
            result,
            Err(FieldMapError::Duplicate { kind: "public name", .. })
        ));
    }

    #[test]
    fn test_rejects_non_string_target() {
        let result = FieldMap::from_value(&json!({ "document": { "a": 1 } }));
        assert!(matches!(result, Err(FieldMapError::Shape(_))));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(FieldMap::from_value(&json!(["record"])).is_err());
    }

    #[test]
    fn test_rejects_non_object_section() {
        let result = FieldMap::from_value(&json!({ "document": "title" }));
        assert!(matches!(result, Err(FieldMapError::Shape(_))));
    }
}
