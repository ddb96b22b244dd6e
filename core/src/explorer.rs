#![deny(missing_docs)]

//! # Operation Explorer
//!
//! Locates the operations named in the generator [`Config`] inside a parsed
//! OpenAPI document and collects their effective parameters.

use crate::config::{
    Config, DataSourceConfig, HttpMethod, OperationLocation, ResourceConfig, SchemaOptions,
};
use crate::error::{MapperError, MapperResult};
use indexmap::IndexMap;
use std::fmt;
use utoipa::openapi::path::{Operation, Parameter, ParameterIn, PathItem};
use utoipa::openapi::OpenApi;

/// An operation found in the document, with its effective parameters.
#[derive(Clone)]
pub struct ExploredOperation<'a> {
    /// Path template the operation lives under.
    pub path: &'a str,
    /// HTTP method of the operation.
    pub method: HttpMethod,
    /// The operation itself.
    pub operation: &'a Operation,
    /// Path-item parameters followed by operation parameters, de-duplicated by
    /// `(name, in)` with the operation's definition winning.
    pub parameters: Vec<&'a Parameter>,
}

// Manual Debug implementation because utoipa::openapi::path::Operation does not implement Debug.
impl fmt::Debug for ExploredOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExploredOperation")
            .field("path", &self.path)
            .field("method", &self.method)
            .field(
                "parameters",
                &self.parameters.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The operations backing one resource.
#[derive(Debug, Clone)]
pub struct ExploredResource<'a> {
    /// Create operation.
    pub create: ExploredOperation<'a>,
    /// Read operation.
    pub read: ExploredOperation<'a>,
    /// Attribute options from the config.
    pub options: &'a SchemaOptions,
}

/// The operation backing one data source.
#[derive(Debug, Clone)]
pub struct ExploredDataSource<'a> {
    /// Read operation.
    pub read: ExploredOperation<'a>,
    /// Attribute options from the config.
    pub options: &'a SchemaOptions,
}

/// Looks up configured operations in a document.
pub struct ConfigExplorer<'a> {
    document: &'a OpenApi,
    config: &'a Config,
}

impl<'a> ConfigExplorer<'a> {
    /// Creates an explorer over `document` driven by `config`.
    pub fn new(document: &'a OpenApi, config: &'a Config) -> Self {
        Self { document, config }
    }

    /// Explores every configured resource, in name order.
    ///
    /// Each entry carries its own result so one missing operation does not
    /// hide the others.
    pub fn resources(&self) -> Vec<(&'a str, MapperResult<ExploredResource<'a>>)> {
        self.config
            .resources
            .iter()
            .map(|(name, resource)| (name.as_str(), self.explore_resource(name, resource)))
            .collect()
    }

    /// Explores every configured data source, in name order.
    pub fn data_sources(&self) -> Vec<(&'a str, MapperResult<ExploredDataSource<'a>>)> {
        self.config
            .data_sources
            .iter()
            .map(|(name, data_source)| {
                (name.as_str(), self.explore_data_source(name, data_source))
            })
            .collect()
    }

    fn explore_resource(
        &self,
        name: &str,
        resource: &'a ResourceConfig,
    ) -> MapperResult<ExploredResource<'a>> {
        Ok(ExploredResource {
            create: self.find_operation(name, "create", resource.create.as_ref())?,
            read: self.find_operation(name, "read", resource.read.as_ref())?,
            options: &resource.schema,
        })
    }

    fn explore_data_source(
        &self,
        name: &str,
        data_source: &'a DataSourceConfig,
    ) -> MapperResult<ExploredDataSource<'a>> {
        Ok(ExploredDataSource {
            read: self.find_operation(name, "read", data_source.read.as_ref())?,
            options: &data_source.schema,
        })
    }

    fn find_operation(
        &self,
        entity: &str,
        role: &str,
        location: Option<&'a OperationLocation>,
    ) -> MapperResult<ExploredOperation<'a>> {
        let location = location.ok_or_else(|| {
            MapperError::Explorer(format!("'{}' has no {} operation configured", entity, role))
        })?;

        let path_item = self.document.paths.paths.get(&location.path).ok_or_else(|| {
            MapperError::Explorer(format!(
                "{} operation of '{}': path '{}' not found",
                role, entity, location.path
            ))
        })?;

        let operation = operation_for(path_item, location.method).ok_or_else(|| {
            MapperError::Explorer(format!(
                "{} operation of '{}': method '{}' not found on path '{}'",
                role, entity, location.method, location.path
            ))
        })?;

        Ok(ExploredOperation {
            path: &location.path,
            method: location.method,
            operation,
            parameters: effective_parameters(path_item, operation),
        })
    }
}

fn operation_for(path_item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    let operation = match method {
        HttpMethod::Get => &path_item.get,
        HttpMethod::Put => &path_item.put,
        HttpMethod::Post => &path_item.post,
        HttpMethod::Delete => &path_item.delete,
        HttpMethod::Options => &path_item.options,
        HttpMethod::Head => &path_item.head,
        HttpMethod::Patch => &path_item.patch,
        HttpMethod::Trace => &path_item.trace,
    };
    operation.as_ref()
}

fn effective_parameters<'a>(
    path_item: &'a PathItem,
    operation: &'a Operation,
) -> Vec<&'a Parameter> {
    let mut by_key: IndexMap<(&'a str, &'static str), &'a Parameter> = IndexMap::new();

    let shared = path_item.parameters.iter().flatten();
    let own = operation.parameters.iter().flatten();
    for parameter in shared.chain(own) {
        by_key.insert(
            (parameter.name.as_str(), location_name(&parameter.parameter_in)),
            parameter,
        );
    }

    by_key.into_values().collect()
}

fn location_name(location: &ParameterIn) -> &'static str {
    match location {
        ParameterIn::Query => "query",
        ParameterIn::Path => "path",
        ParameterIn::Header => "header",
        ParameterIn::Cookie => "cookie",
    }
}
