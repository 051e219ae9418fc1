//! Post-processing rules keyed by public field name
//!
//! Applied after normalization:
//! - date fields: UNIX timestamp -> ISO-8601 with numeric offset
//! - identifier field: internal id -> absolute document URL
//! - everything else passes through

use std::collections::HashMap;

use chrono::{FixedOffset, Offset, TimeZone, Utc};
use serde_json::Value;

use super::links::LinkBuilder;
use super::value::scalar_text;

/// Date fields rewritten unless configured otherwise
pub const DEFAULT_DATE_FIELDS: [&str; 4] = ["created", "changed", "startDate", "endDate"];

/// Public name of the identifier field
pub const DEFAULT_ID_FIELD: &str = "id";

/// A single rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRule {
    Timestamp,
    DocumentUrl,
}

/// Table of rewrites plus what they need to run.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    rules: HashMap<String, PostRule>,
    offset: FixedOffset,
    links: LinkBuilder,
}

impl PostProcessor {
    /// No rules, UTC offset
    pub fn new(links: LinkBuilder) -> Self {
        Self {
            rules: HashMap::new(),
            offset: utc(),
            links,
        }
    }

    /// Default date fields and `id` rewrite
    pub fn with_defaults(links: LinkBuilder) -> Self {
        Self::new(links)
            .with_date_fields(DEFAULT_DATE_FIELDS)
            .with_id_field(DEFAULT_ID_FIELD)
    }

    pub fn with_date_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self.rules.insert(field.into(), PostRule::Timestamp);
        }
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.rules.insert(field.into(), PostRule::DocumentUrl);
        self
    }

    /// Falls back to UTC when the offset is out of range.
    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.offset = FixedOffset::east_opt(seconds).unwrap_or_else(utc);
        self
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn rule_for(&self, public_name: &str) -> Option<PostRule> {
        self.rules.get(public_name).copied()
    }

    /// Rewrites a projected value according to its public name.
    pub fn apply_post_processing(&self, public_name: &str, value: Value) -> Value {
        match self.rule_for(public_name) {
            Some(rule) => self.apply_rule(rule, value),
            None => value,
        }
    }

    /// Applies one rule; arrays are rewritten element-wise.
    pub fn apply_rule(&self, rule: PostRule, value: Value) -> Value {
        if let Value::Array(items) = value {
            return Value::Array(
                items
                    .into_iter()
                    .map(|item| self.apply_rule(rule, item))
                    .collect(),
            );
        }

        let rewritten = match rule {
            PostRule::Timestamp => self.format_timestamp(&value),
            PostRule::DocumentUrl => scalar_text(&value).map(|id| self.links.document_url(&id)),
        };

        rewritten.map(Value::String).unwrap_or(value)
    }

    /// `915216645` -> `1999-01-01T18:50:45+00:00` at UTC
    pub fn format_timestamp(&self, value: &Value) -> Option<String> {
        let seconds = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }?;

        let datetime = self.offset.timestamp_opt(seconds, 0).single()?;
        Some(datetime.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn processor() -> PostProcessor {
        PostProcessor::with_defaults(LinkBuilder::new("library.example.org"))
    }

    #[test]
    fn test_created_timestamp() {
        let out = processor().apply_post_processing("created", json!(915216645));
        assert_eq!(out, json!("1999-01-01T18:50:45+00:00"));
    }

    #[test]
    fn test_timestamp_from_string() {
        let out = processor().apply_post_processing("endDate", json!("0"));
        assert_eq!(out, json!("1970-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_timestamp_with_offset() {
        let out = processor()
            .with_utc_offset(-5 * 3600)
            .apply_post_processing("changed", json!(915216645));
        assert_eq!(out, json!("1999-01-01T13:50:45-05:00"));
    }

    #[test]
    fn test_unparseable_date_unchanged() {
        let out = processor().apply_post_processing("startDate", json!("spring 1999"));
        assert_eq!(out, json!("spring 1999"));
    }

    #[test]
    fn test_id_becomes_url() {
        let out = processor().apply_post_processing("id", json!(42));
        assert_eq!(out, json!("http://library.example.org/documents/42"));
    }

    #[test]
    fn test_other_fields_unchanged() {
        let out = processor().apply_post_processing("title", json!("Tidal flats"));
        assert_eq!(out, json!("Tidal flats"));
    }

    #[test]
    fn test_no_id_rule_without_configuration() {
        let post = PostProcessor::new(LinkBuilder::new("h")).with_date_fields(["created"]);
        assert_eq!(post.apply_post_processing("id", json!(42)), json!(42));
    }

    #[test]
    fn test_array_elementwise() {
        let out = processor().apply_post_processing("created", json!([0, "x"]));
        assert_eq!(out, json!(["1970-01-01T00:00:00+00:00", "x"]));
    }
}
