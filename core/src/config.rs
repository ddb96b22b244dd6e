#![deny(missing_docs)]

//! # Generator Configuration
//!
//! The YAML file that tells the mapper which operations back which entities,
//! and how their attributes should be renamed or annotated.
//!
//! ```yaml
//! provider:
//!   name: petstore
//! resources:
//!   pet:
//!     create: { path: /pet, method: POST }
//!     read: { path: /pet/{petId}, method: GET }
//!     schema:
//!       attributes:
//!         aliases: { petId: id }
//!         overrides:
//!           category.name: { description: "Category name" }
//! data_sources:
//!   pets:
//!     read: { path: /pet/findByStatus, method: GET }
//! ```

use crate::error::{MapperError, MapperResult};
use derive_more::Display;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Root of the generator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Provider-level settings.
    pub provider: ProviderConfig,
    /// Resources keyed by name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,
    /// Data sources keyed by name.
    #[serde(default)]
    pub data_sources: BTreeMap<String, DataSourceConfig>,
}

/// Provider-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider name, copied to the output.
    pub name: String,
}

/// Operations and options for one resource.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Operation whose request body defines the configurable attributes.
    pub create: Option<OperationLocation>,
    /// Operation that reads the resource back.
    pub read: Option<OperationLocation>,
    /// Attribute options.
    #[serde(default)]
    pub schema: SchemaOptions,
}

/// Operation and options for one data source.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSourceConfig {
    /// Operation whose response body defines the attributes.
    pub read: Option<OperationLocation>,
    /// Attribute options.
    #[serde(default)]
    pub schema: SchemaOptions,
}

/// Where an operation lives in the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationLocation {
    /// Path template, e.g. `/pet/{petId}`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
}

/// The HTTP methods an OpenAPI path item can hold.
///
/// Parsed case-insensitively.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    /// `GET`
    #[display("get")]
    Get,
    /// `PUT`
    #[display("put")]
    Put,
    /// `POST`
    #[display("post")]
    Post,
    /// `DELETE`
    #[display("delete")]
    Delete,
    /// `OPTIONS`
    #[display("options")]
    Options,
    /// `HEAD`
    #[display("head")]
    Head,
    /// `PATCH`
    #[display("patch")]
    Patch,
    /// `TRACE`
    #[display("trace")]
    Trace,
}

impl TryFrom<String> for HttpMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(format!("unknown HTTP method '{}'", value)),
        }
    }
}

/// Per-entity schema options.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaOptions {
    /// Attribute options.
    #[serde(default)]
    pub attributes: AttributeOptions,
}

/// Attribute renaming and annotation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeOptions {
    /// Parameter name to attribute name.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Dotted attribute path to override.
    #[serde(default)]
    pub overrides: BTreeMap<String, AttributeOverride>,
}

/// Replacement metadata for one attribute.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeOverride {
    /// Replaces the schema description.
    pub description: Option<String>,
    /// Replaces the sensitivity flag.
    pub sensitive: Option<bool>,
}

impl Config {
    /// Parses and validates a YAML configuration.
    pub fn parse(yaml: &str) -> MapperResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| MapperError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration at `path`.
    pub fn load(path: &Path) -> MapperResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            MapperError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::parse(&yaml)
    }

    /// Checks the invariants `serde` cannot express.
    pub fn validate(&self) -> MapperResult<()> {
        if self.provider.name.trim().is_empty() {
            return Err(MapperError::Config("provider name is required".to_string()));
        }

        for (name, resource) in &self.resources {
            let entity = format!("resource '{}'", name);
            validate_location(&entity, "create", resource.create.as_ref())?;
            validate_location(&entity, "read", resource.read.as_ref())?;
            validate_options(&entity, &resource.schema)?;
        }

        for (name, data_source) in &self.data_sources {
            let entity = format!("data source '{}'", name);
            validate_location(&entity, "read", data_source.read.as_ref())?;
            validate_options(&entity, &data_source.schema)?;
        }

        Ok(())
    }
}

fn validate_location(
    entity: &str,
    operation: &str,
    location: Option<&OperationLocation>,
) -> MapperResult<()> {
    let location = location.ok_or_else(|| {
        MapperError::Config(format!("{} must have a {} operation", entity, operation))
    })?;

    if !location.path.starts_with('/') {
        return Err(MapperError::Config(format!(
            "{} {} path '{}' must start with '/'",
            entity, operation, location.path
        )));
    }
    Ok(())
}

fn validate_options(entity: &str, options: &SchemaOptions) -> MapperResult<()> {
    for (param, alias) in &options.attributes.aliases {
        if alias.is_empty() {
            return Err(MapperError::Config(format!(
                "{} alias for '{}' is empty",
                entity, param
            )));
        }
    }

    for path in options.attributes.overrides.keys() {
        if path.split('.').any(str::is_empty) {
            return Err(MapperError::Config(format!(
                "{} override path '{}' has an empty segment",
                entity, path
            )));
        }
    }
    Ok(())
}
