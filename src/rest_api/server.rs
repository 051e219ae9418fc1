//! # REST API Routes
//!
//! Axum wiring for the two document endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::context::{EndpointRequest, RequestContext};
use super::endpoint::Endpoint;
use super::errors::RestError;
use super::list::ListEndpoint;
use super::response::ResponseEnvelope;
use super::single_record::SingleRecordEndpoint;

/// Endpoints plus the host used when a request carries no Host header
pub struct ApiState {
    pub single_record: SingleRecordEndpoint,
    pub list: ListEndpoint,
    pub default_host: String,
}

impl ApiState {
    pub fn new(single_record: SingleRecordEndpoint, list: ListEndpoint, default_host: impl Into<String>) -> Self {
        Self {
            single_record,
            list,
            default_host: default_host.into(),
        }
    }

    fn context(&self, headers: &HeaderMap, uri: &Uri) -> RequestContext {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(&self.default_host);
        RequestContext::capture(host, uri)
    }
}

/// Shared state type
type ServerState = Arc<ApiState>;

/// Build the document routes
pub fn document_routes(state: ServerState) -> Router {
    Router::new()
        .route("/documents", get(list_handler))
        .route("/documents/:id", get(record_handler))
        .with_state(state)
}

/// Runs an endpoint and renders its outcome.
///
/// Not-found answers 404 with the bare metadata envelope.
fn respond(endpoint: &dyn Endpoint, request: &EndpointRequest) -> Response {
    match endpoint.handle(request) {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(RestError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ResponseEnvelope::new(request.context.clone())),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(uri = %request.context.uri, error = %err, "request failed");
            err.into_response()
        }
    }
}

/// Single record handler
async fn record_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let request = EndpointRequest::record(state.context(&headers, &uri), id);
    respond(&state.single_record, &request)
}

/// Document id list handler
async fn list_handler(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let request = EndpointRequest::list(state.context(&headers, &uri), params);
    respond(&state.list, &request)
}
