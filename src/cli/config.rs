//! Service configuration file
//!
//! Only `field_map_path` and `records_path` are required. Relative paths are
//! resolved against the directory holding the config file.
//!
//! ```json
//! {
//!   "port": 8080,
//!   "field_map_path": "field_map.json",
//!   "records_path": "records.json",
//!   "public_host": "library.example.org"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::projection::{DerivedFields, LinkBuilder, PostProcessor, DEFAULT_DATE_FIELDS, DEFAULT_ID_FIELD};
use crate::store::AnnotationConfig;

use super::errors::{CliError, CliResult};

/// Largest offset chrono accepts, exclusive
const MAX_UTC_OFFSET_SECONDS: i32 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address and CORS
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Field map JSON file
    pub field_map_path: PathBuf,

    /// Records JSON file for the in-memory store
    pub records_path: PathBuf,

    /// Host used in synthesized URLs
    #[serde(default = "default_public_host")]
    pub public_host: String,

    /// Offset applied when formatting timestamps
    #[serde(default)]
    pub utc_offset_seconds: i32,

    /// Public names rewritten from UNIX timestamps
    #[serde(default = "default_date_fields")]
    pub date_fields: Vec<String>,

    /// Public name rewritten to a document URL; null disables the rewrite
    #[serde(default = "default_id_field")]
    pub id_field: Option<String>,

    /// Derived single-record fields; null disables them
    #[serde(default = "default_derived")]
    pub derived: Option<DerivedFields>,

    /// Annotation service; absent means no annotation URLs
    #[serde(default)]
    pub annotation: Option<AnnotationConfig>,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Tracing filter directive, overridden by RUST_LOG
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_public_host() -> String {
    "localhost".to_string()
}

fn default_date_fields() -> Vec<String> {
    DEFAULT_DATE_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_id_field() -> Option<String> {
    Some(DEFAULT_ID_FIELD.to_string())
}

fn default_derived() -> Option<DerivedFields> {
    Some(DerivedFields::default())
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config = Self::parse(&content)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Makes relative data paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.field_map_path.is_relative() {
            self.field_map_path = base.join(&self.field_map_path);
        }
        if self.records_path.is_relative() {
            self.records_path = base.join(&self.records_path);
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.public_host.trim().is_empty() {
            return Err(CliError::config_error("public_host must not be empty"));
        }

        if self.utc_offset_seconds.abs() >= MAX_UTC_OFFSET_SECONDS {
            return Err(CliError::config_error(format!(
                "utc_offset_seconds must be within ±{}",
                MAX_UTC_OFFSET_SECONDS - 1
            )));
        }

        if let Some(id_field) = &self.id_field {
            if self.date_fields.contains(id_field) {
                return Err(CliError::config_error(format!(
                    "'{}' cannot be both a date field and the id field",
                    id_field
                )));
            }
        }

        if let Some(annotation) = &self.annotation {
            if annotation.base_url.trim().is_empty() {
                return Err(CliError::config_error("annotation.base_url must not be empty"));
            }
        }

        Ok(())
    }

    /// Post-processing table described by this config
    pub fn post_processor(&self) -> PostProcessor {
        let post = PostProcessor::new(LinkBuilder::new(&self.public_host))
            .with_date_fields(self.date_fields.iter().cloned())
            .with_utc_offset(self.utc_offset_seconds);

        match &self.id_field {
            Some(field) => post.with_id_field(field.clone()),
            None => post,
        }
    }
}
