//! Per-request context
//!
//! Everything an endpoint needs to know about the incoming request is
//! captured here once and passed in explicitly.

use axum::http::Uri;
use serde::Serialize;

/// Standard metadata echoed in every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    /// UNIX seconds at which the request was received
    pub request_time: i64,
    /// Host plus path and query
    pub uri: String,
    /// Raw query string, empty when absent
    pub query_string: String,
}

impl RequestContext {
    pub fn new(request_time: i64, host: &str, uri: &Uri) -> Self {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());

        Self {
            request_time,
            uri: format!("{}{}", host, path_and_query),
            query_string: uri.query().unwrap_or_default().to_string(),
        }
    }

    /// Context stamped with the current time
    pub fn capture(host: &str, uri: &Uri) -> Self {
        Self::new(chrono::Utc::now().timestamp(), host, uri)
    }
}

/// Input to an endpoint
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    pub context: RequestContext,
    /// Path id for the single-record endpoint, unparsed
    pub record_id: Option<String>,
    /// Query parameters in request order
    pub params: Vec<(String, String)>,
}

impl EndpointRequest {
    pub fn record(context: RequestContext, id: impl Into<String>) -> Self {
        Self {
            context,
            record_id: Some(id.into()),
            params: Vec::new(),
        }
    }

    pub fn list(context: RequestContext, params: Vec<(String, String)>) -> Self {
        Self {
            context,
            record_id: None,
            params,
        }
    }
}
