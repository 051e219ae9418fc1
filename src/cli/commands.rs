//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use axum::http::Uri;
use serde_json::{Map, Value};

use crate::field_map::{FieldMap, FieldMapLoader};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::projection::Projector;
use crate::rest_api::{
    ApiState, Endpoint, EndpointRequest, ListEndpoint, RequestContext, RestError,
    SingleRecordEndpoint,
};
use crate::store::{AnnotationService, MemoryStore, StaticAnnotationIndex};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config),
        Command::Show { config, id } => show(&config, &id),
        Command::CheckMap { config } => check_map(&config),
    }
}

/// Loads the field map and records named by `config` and wires the endpoints.
pub fn build_state(config: &Config) -> CliResult<ApiState> {
    let field_map = Arc::new(FieldMapLoader::load(&config.field_map_path)?);
    let store = Arc::new(MemoryStore::load_file(&config.records_path)?);
    let projector = Arc::new(Projector::new(&field_map, config.post_processor()));

    let mut single_record = SingleRecordEndpoint::new(store.clone(), projector);
    if let Some(derived) = &config.derived {
        single_record = single_record.with_derived(derived.clone());
    }
    if let Some(annotation) = &config.annotation {
        let index = StaticAnnotationIndex::from_config(annotation);
        tracing::info!(documents = index.len(), "annotation index enabled");
        single_record = single_record.with_annotation(Arc::new(index) as Arc<dyn AnnotationService>);
    }

    let list = ListEndpoint::new(field_map, store.clone(), store);

    Ok(ApiState::new(single_record, list, config.public_host.clone()))
}

/// Start the HTTP server and block until it exits
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(config.log_format, config.log_filter.as_deref());

    let state = build_state(&config)?;
    let server = HttpServer::new(config.server.clone(), state);
    tracing::info!(addr = %server.socket_addr(), "starting biblio-api");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

/// Print one record through the single-record endpoint
pub fn show(config_path: &Path, id: &str) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(config.log_format, config.log_filter.as_deref());

    let state = build_state(&config)?;
    let uri: Uri = format!("/documents/{}", id)
        .parse()
        .map_err(|_| CliError::not_found(id))?;
    let context = RequestContext::capture(&config.public_host, &uri);

    match state
        .single_record
        .handle(&EndpointRequest::record(context, id))
    {
        Ok(envelope) => write_json(&envelope),
        Err(RestError::NotFound) => Err(CliError::not_found(id)),
        Err(err) => Err(CliError::io_error(err.to_string())),
    }
}

/// Validate the field map and print it
pub fn check_map(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let field_map = FieldMapLoader::load(&config.field_map_path)?;
    write_json(&describe_field_map(&field_map))
}

/// `{"sections": {...}, "fields": n}` summary of a field map
fn describe_field_map(field_map: &FieldMap) -> Value {
    let mut sections = Map::new();
    for section in field_map.sections() {
        let entries: Map<String, Value> = section
            .entries()
            .map(|(internal, public)| (internal.to_string(), Value::String(public.to_string())))
            .collect();
        sections.insert(section.name().to_string(), Value::Object(entries));
    }

    serde_json::json!({
        "sections": sections,
        "fields": field_map.field_count(),
    })
}
