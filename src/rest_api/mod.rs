//! # REST API Module
//!
//! JSON endpoints over projected records:
//! - `GET /documents/:id`: one record, grouped by field map section
//! - `GET /documents`: ids of records matching query parameters
//!
//! Both endpoints share the response envelope (metadata, errors, payload)
//! by composition.

pub mod context;
pub mod endpoint;
pub mod errors;
pub mod list;
pub mod response;
pub mod server;
pub mod single_record;

pub use context::{EndpointRequest, RequestContext};
pub use endpoint::Endpoint;
pub use errors::{RestError, RestResult};
pub use list::{ListEndpoint, DOCUMENT_IDS_KEY};
pub use response::ResponseEnvelope;
pub use server::{document_routes, ApiState};
pub use single_record::SingleRecordEndpoint;
