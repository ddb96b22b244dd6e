#![deny(missing_docs)]

//! # Entity Mappers
//!
//! Turns explored operations into entities (resources and data sources).
//!
//! Mappers are the recovery boundary of the pipeline: a failing entity is
//! logged and left out of the output, the rest of the run continues.
//!
//! - **resource**: create request + create/read responses + read parameters.
//! - **data_source**: read response + read parameters.
//! - **params**: path/query parameter attributes.
//! - **overrides**: config-driven description/sensitivity overrides.

pub mod data_source;
pub mod overrides;
pub mod params;
pub mod resource;

pub use data_source::DataSourceMapper;
pub use resource::ResourceMapper;

use crate::config::Config;
use crate::error::MapperResult;
use crate::explorer::ConfigExplorer;
use crate::ir::{Attribute, Entity, EntityKind, ProviderIr};
use crate::oas::RefResolver;
use std::collections::BTreeMap;
use tracing::warn;
use utoipa::openapi::OpenApi;

/// Maps a set of named entities into IR.
pub trait EntityMapper {
    /// Which collection this mapper fills.
    fn kind(&self) -> EntityKind;

    /// Names of the entities to map, in lexicographic order.
    fn names(&self) -> Vec<&str>;

    /// Builds the attribute list of the entity called `name`.
    fn map_attributes(&self, name: &str) -> MapperResult<Vec<Attribute>>;

    /// Maps every entity, skipping (and logging) the ones that fail.
    fn map_to_ir(&self) -> Vec<Entity> {
        let kind = self.kind();
        let mut entities = Vec::new();

        for name in self.names() {
            match self.map_attributes(name) {
                Ok(attributes) => entities.push(Entity {
                    name: name.to_string(),
                    kind,
                    attributes,
                }),
                Err(err) => warn!(entity = name, error = %err, "skipping {} schema", kind),
            }
        }

        entities
    }
}

/// Maps every configured resource and data source of `document`.
///
/// Entities whose operations cannot be found, or whose schemas fail to build,
/// are logged and omitted.
pub fn map_document(document: &OpenApi, config: &Config) -> ProviderIr {
    let explorer = ConfigExplorer::new(document, config);
    let refs = RefResolver::for_document(document);

    let resources = keep_explored(EntityKind::Resource, explorer.resources());
    let data_sources = keep_explored(EntityKind::DataSource, explorer.data_sources());

    ProviderIr {
        provider: config.provider.name.clone(),
        resources: ResourceMapper::new(refs, resources).map_to_ir(),
        data_sources: DataSourceMapper::new(refs, data_sources).map_to_ir(),
    }
}

fn keep_explored<'a, T>(
    kind: EntityKind,
    explored: Vec<(&'a str, MapperResult<T>)>,
) -> BTreeMap<&'a str, T> {
    explored
        .into_iter()
        .filter_map(|(name, result)| match result {
            Ok(entity) => Some((name, entity)),
            Err(err) => {
                warn!(entity = name, error = %err, "skipping {}", kind);
                None
            }
        })
        .collect()
}
