//! # Response Envelope
//!
//! Every endpoint answers with the same top-level layout:
//! `request_time`, `uri`, `query_string`, then `errors` when there are
//! any, then the endpoint's payload keys.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::context::RequestContext;

/// Keys owned by the envelope; payload entries may not reuse them
const RESERVED_KEYS: [&str; 4] = ["request_time", "uri", "query_string", "errors"];

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    metadata: RequestContext,
    errors: Vec<String>,
    payload: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Metadata only; also the body of a not-found response
    pub fn new(metadata: RequestContext) -> Self {
        Self {
            metadata,
            errors: Vec::new(),
            payload: Map::new(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn insert_payload(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "payload key collides with response metadata, dropped");
            return;
        }
        self.payload.insert(key, value);
    }

    pub fn extend_payload(&mut self, entries: Map<String, Value>) {
        for (key, value) in entries {
            self.insert_payload(key, value);
        }
    }

    pub fn metadata(&self) -> &RequestContext {
        &self.metadata
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("request_time", &self.metadata.request_time)?;
        map.serialize_entry("uri", &self.metadata.uri)?;
        map.serialize_entry("query_string", &self.metadata.query_string)?;

        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }

        for (key, value) in &self.payload {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> RequestContext {
        RequestContext {
            request_time: 100,
            uri: "h/documents".to_string(),
            query_string: String::new(),
        }
    }

    #[test]
    fn test_metadata_only() {
        let json = serde_json::to_value(ResponseEnvelope::new(context())).unwrap();
        assert_eq!(
            json,
            json!({"request_time": 100, "uri": "h/documents", "query_string": ""})
        );
    }

    #[test]
    fn test_errors_and_payload() {
        let mut envelope = ResponseEnvelope::new(context());
        envelope.push_error("Invalid field: foo");
        envelope.insert_payload("document_ids", json!([1, 2]));

        let text = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            text,
            r#"{"request_time":100,"uri":"h/documents","query_string":"","errors":["Invalid field: foo"],"document_ids":[1,2]}"#
        );
    }

    #[test]
    fn test_reserved_payload_key_dropped() {
        let mut envelope = ResponseEnvelope::new(context());
        envelope.insert_payload("uri", json!("spoofed"));
        assert!(envelope.payload().is_empty());
    }
}
