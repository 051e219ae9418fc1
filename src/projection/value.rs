//! Raw value normalization
//!
//! Record values arrive in a handful of shapes:
//! - plain scalars
//! - boxed values: `{"value": <scalar>}`
//! - multi-valued fields: arrays (or keyed objects) of taxonomy terms or
//!   contributor entities; any other entry is skipped
//!
//! Normalization turns each of these into a scalar or an array of scalars.
//! Empty results are reported as `None` and never emitted.

use serde_json::Value;

/// Key holding the payload of a boxed value
pub const VALUE_KEY: &str = "value";

/// Marks a taxonomy term entry
pub const VOCABULARY_KEY: &str = "vocabulary_machine_name";

/// Display name of a taxonomy term
pub const TERM_NAME_KEY: &str = "name";

/// Marks a contributor entity and holds its name
pub const CONTRIBUTOR_NAME_KEY: &str = "biblio_contributor_name";

/// Contributor entity id
pub const CONTRIBUTOR_ID_KEY: &str = "cid";

/// Returns true for null, `""`, `[]` and `{}`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Normalizes a raw field value.
pub fn normalize(raw: &Value) -> Option<Value> {
    if is_empty(raw) {
        return None;
    }

    match raw {
        Value::Object(obj) if obj.contains_key(VALUE_KEY) => normalize(&obj[VALUE_KEY]),
        Value::Array(entries) => collect_entries(entries.iter()),
        Value::Object(obj) => collect_entries(obj.values()),
        scalar => Some(scalar.clone()),
    }
}

fn collect_entries<'a>(entries: impl Iterator<Item = &'a Value>) -> Option<Value> {
    let mut values = Vec::new();
    for entry in entries {
        extract_entry(entry, &mut values);
    }

    if values.is_empty() {
        None
    } else {
        Some(Value::Array(values))
    }
}

/// Pushes what one entry of a multi-valued field contributes.
///
/// Only entities count. The term and contributor checks are independent,
/// so an entry carrying both markers contributes twice.
fn extract_entry(entry: &Value, out: &mut Vec<Value>) {
    let Value::Object(obj) = entry else {
        return;
    };

    if obj.contains_key(VOCABULARY_KEY) {
        out.extend(obj.get(TERM_NAME_KEY).and_then(unbox_scalar));
    }
    if obj.contains_key(CONTRIBUTOR_NAME_KEY) {
        out.extend(Contributor::from_entry(entry).and_then(|c| c.name));
    }
}

/// Returns a non-empty scalar, looking through one level of boxing.
pub fn unbox_scalar(value: &Value) -> Option<Value> {
    match value {
        Value::Object(obj) => obj.get(VALUE_KEY).and_then(unbox_scalar),
        Value::Array(_) => None,
        v if is_empty(v) => None,
        v => Some(v.clone()),
    }
}

/// Renders a scalar as text; strings come out unquoted.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Every scalar the normalizer would emit for a raw value, as text.
pub fn scalar_texts(raw: &Value) -> Vec<String> {
    match normalize(raw) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(v) => scalar_text(&v).into_iter().collect(),
        None => Vec::new(),
    }
}

/// A contributor entity re-wrapped from a multi-valued entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub cid: Option<String>,
    pub name: Option<Value>,
}

impl Contributor {
    /// Wraps an entry carrying a contributor name; other shapes yield `None`.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let obj = entry.as_object()?;
        let raw_name = obj.get(CONTRIBUTOR_NAME_KEY)?;

        Some(Self {
            cid: obj
                .get(CONTRIBUTOR_ID_KEY)
                .and_then(unbox_scalar)
                .and_then(|v| scalar_text(&v)),
            name: unbox_scalar(raw_name),
        })
    }

    /// All contributors found in a multi-valued field, in order.
    pub fn collect(raw: &Value) -> Vec<Self> {
        let entries: Vec<&Value> = match raw {
            Value::Array(items) => items.iter().collect(),
            Value::Object(obj) if !obj.contains_key(CONTRIBUTOR_NAME_KEY) => {
                obj.values().collect()
            }
            single @ Value::Object(_) => vec![single],
            _ => Vec::new(),
        };

        entries.into_iter().filter_map(Self::from_entry).collect()
    }
}
