//! Endpoint contract

use super::context::EndpointRequest;
use super::errors::RestResult;
use super::response::ResponseEnvelope;

/// A request handler producing a response envelope.
///
/// Endpoints share the envelope by composition; each one only decides
/// which errors and payload keys to add.
pub trait Endpoint: Send + Sync {
    fn handle(&self, request: &EndpointRequest) -> RestResult<ResponseEnvelope>;
}
