//! # List Endpoint
//!
//! `GET /documents?<publicName>=<substring>&...`: translates public names to
//! internal fields and returns the ids of matching records. Unknown names
//! are dropped and reported; the rest of the query still runs.

use std::sync::Arc;

use serde_json::Value;

use crate::field_map::FieldMap;
use crate::store::{FieldCatalog, FieldCondition, QueryExecutor};

use super::context::EndpointRequest;
use super::endpoint::Endpoint;
use super::errors::RestResult;
use super::response::ResponseEnvelope;

/// Payload key holding matching ids
pub const DOCUMENT_IDS_KEY: &str = "document_ids";

pub struct ListEndpoint {
    field_map: Arc<FieldMap>,
    catalog: Arc<dyn FieldCatalog>,
    executor: Arc<dyn QueryExecutor>,
}

impl ListEndpoint {
    pub fn new(
        field_map: Arc<FieldMap>,
        catalog: Arc<dyn FieldCatalog>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            field_map,
            catalog,
            executor,
        }
    }

    /// Maps query parameters onto internal field conditions.
    ///
    /// Returns the conditions plus one error per rejected name, both in
    /// request order. A repeated name keeps its last value. Catalog failures
    /// are propagated, never reported as invalid fields.
    pub fn translate_params(
        &self,
        params: &[(String, String)],
    ) -> RestResult<(Vec<FieldCondition>, Vec<String>)> {
        let mut conditions: Vec<(String, FieldCondition)> = Vec::new();
        let mut errors = Vec::new();

        for (name, value) in params {
            if let Some((_, existing)) = conditions.iter_mut().find(|(n, _)| n == name) {
                existing.substring = value.clone();
                continue;
            }

            match self.resolve(name)? {
                Some(internal) => {
                    conditions.push((name.clone(), FieldCondition::new(internal, value.clone())));
                }
                None => {
                    let message = format!("Invalid field: {}", name);
                    if !errors.contains(&message) {
                        tracing::debug!(field = %name, "dropping unknown query field");
                        errors.push(message);
                    }
                }
            }
        }

        Ok((conditions.into_iter().map(|(_, c)| c).collect(), errors))
    }

    /// Internal id for a public name, if it is mapped and the catalog knows it
    fn resolve(&self, public_name: &str) -> RestResult<Option<String>> {
        let Some(internal) = self.field_map.reverse_lookup(public_name) else {
            return Ok(None);
        };
        if self.catalog.has_field(internal)? {
            Ok(Some(internal.to_string()))
        } else {
            Ok(None)
        }
    }
}

impl Endpoint for ListEndpoint {
    fn handle(&self, request: &EndpointRequest) -> RestResult<ResponseEnvelope> {
        let (conditions, errors) = self.translate_params(&request.params)?;

        let mut envelope = ResponseEnvelope::new(request.context.clone());
        for error in errors {
            envelope.push_error(error);
        }

        // Parameters were given but none survived: nothing can match
        let ids = if conditions.is_empty() && !request.params.is_empty() {
            Vec::new()
        } else {
            self.executor.find_ids(&conditions)?
        };

        tracing::debug!(
            conditions = conditions.len(),
            matches = ids.len(),
            "list query executed"
        );

        envelope.insert_payload(
            DOCUMENT_IDS_KEY,
            Value::Array(ids.into_iter().map(Value::from).collect()),
        );
        Ok(envelope)
    }
}
