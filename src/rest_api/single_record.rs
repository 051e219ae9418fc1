//! # Single-Record Endpoint
//!
//! `GET /documents/:id`: projects one record through the field map and
//! merges in the derived fields.

use std::sync::Arc;

use crate::projection::{DerivedFields, Projector};
use crate::store::{AnnotationService, RecordId, RecordStore};

use super::context::EndpointRequest;
use super::endpoint::Endpoint;
use super::errors::{RestError, RestResult};
use super::response::ResponseEnvelope;

pub struct SingleRecordEndpoint {
    store: Arc<dyn RecordStore>,
    projector: Arc<Projector>,
    derived: Option<DerivedFields>,
    annotation: Option<Arc<dyn AnnotationService>>,
}

impl SingleRecordEndpoint {
    /// Plain projection: no derived fields, no annotation service
    pub fn new(store: Arc<dyn RecordStore>, projector: Arc<Projector>) -> Self {
        Self {
            store,
            projector,
            derived: None,
            annotation: None,
        }
    }

    pub fn with_derived(mut self, derived: DerivedFields) -> Self {
        self.derived = Some(derived);
        self
    }

    pub fn with_annotation(mut self, service: Arc<dyn AnnotationService>) -> Self {
        self.annotation = Some(service);
        self
    }

    fn parse_id(request: &EndpointRequest) -> RestResult<RecordId> {
        request
            .record_id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .ok_or(RestError::NotFound)
    }
}

impl Endpoint for SingleRecordEndpoint {
    fn handle(&self, request: &EndpointRequest) -> RestResult<ResponseEnvelope> {
        let id = Self::parse_id(request)?;

        let Some(record) = self.store.load(id)? else {
            tracing::debug!(id, "record not found");
            return Err(RestError::NotFound);
        };

        let mut document = self.projector.project(&record);

        if let Some(derived) = &self.derived {
            derived.apply(
                &mut document,
                &record,
                self.projector.post_processor().links(),
                self.annotation.as_deref(),
            );
        }

        let mut envelope = ResponseEnvelope::new(request.context.clone());
        envelope.extend_payload(document.into_map());
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map::FieldMap;
    use crate::projection::{LinkBuilder, PostProcessor};
    use crate::rest_api::RequestContext;
    use crate::store::{MemoryStore, Record};
    use serde_json::json;

    fn context() -> RequestContext {
        RequestContext {
            request_time: 1,
            uri: "h/documents/5".to_string(),
            query_string: String::new(),
        }
    }

    fn endpoint() -> SingleRecordEndpoint {
        let map = FieldMap::from_value(&json!({
            "document": {"title": "title", "biblio_keywords": "keywords"}
        }))
        .unwrap();
        let projector = Projector::new(&map, PostProcessor::with_defaults(LinkBuilder::new("h")));

        let store = MemoryStore::new();
        store
            .insert(
                Record::new(5)
                    .with_field("title", json!("Tidal flats"))
                    .with_field(
                        "biblio_keywords",
                        json!([
                            {"vocabulary_machine_name": "keywords", "name": "estuary"},
                            {"vocabulary_machine_name": "keywords", "name": "salinity"}
                        ]),
                    ),
            )
            .unwrap();

        SingleRecordEndpoint::new(Arc::new(store), Arc::new(projector))
    }

    #[test]
    fn test_projects_record() {
        let envelope = endpoint()
            .handle(&EndpointRequest::record(context(), "5"))
            .unwrap();

        assert_eq!(
            envelope.payload().get("document"),
            Some(&json!({"title": "Tidal flats", "keywords": ["estuary", "salinity"]}))
        );
        assert!(envelope.errors().is_empty());
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let result = endpoint().handle(&EndpointRequest::record(context(), "6"));
        assert!(matches!(result, Err(RestError::NotFound)));
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        let result = endpoint().handle(&EndpointRequest::record(context(), "abc"));
        assert!(matches!(result, Err(RestError::NotFound)));
    }

    #[test]
    fn test_derived_fields_merged() {
        let envelope = endpoint()
            .with_derived(DerivedFields::default())
            .handle(&EndpointRequest::record(context(), "5"))
            .unwrap();

        assert_eq!(
            envelope.payload()["document"]["identifier"],
            json!("http://h/documents/5")
        );
    }
}
