#![deny(missing_docs)]

//! # tfcodegen Core
//!
//! Lowers OpenAPI operations into the attribute IR of Terraform-style
//! resources and data sources.

/// Shared error types.
pub mod error;

/// Attribute IR and merging.
pub mod ir;

/// OpenAPI loading, schema resolution and attribute building.
pub mod oas;

/// Generator configuration.
pub mod config;

/// Operation lookup driven by the config.
pub mod explorer;

/// Resource and data source mappers.
pub mod mapper;

pub use config::Config;
pub use error::{MapperError, MapperResult};
pub use explorer::ConfigExplorer;
pub use ir::{
    merge_attributes, Attribute, AttributeKind, Computability, ElementType, Entity, EntityKind,
    ObjectAttributeType, ProviderIr,
};
pub use mapper::{map_document, DataSourceMapper, EntityMapper, ResourceMapper};
pub use oas::{load_document, AttributeBuilder, RefResolver, ResolvedSchema};
