#![deny(missing_docs)]

//! # Data Source Mapper
//!
//! A data source is described by:
//! 1. the read response body (required), every top-level attribute `Computed`,
//! 2. the read operation's path/query parameters (optional),
//!
//! merged with parameters first, then config overrides applied.

use crate::error::{MapperError, MapperResult};
use crate::explorer::ExploredDataSource;
use crate::ir::{merge_attributes, Attribute, Computability, EntityKind};
use crate::mapper::overrides::apply_overrides;
use crate::mapper::params::build_parameter_attributes;
use crate::mapper::EntityMapper;
use crate::oas::{resolve_response_schema, AttributeBuilder, RefResolver};
use std::collections::BTreeMap;

/// Maps explored data sources into IR.
#[derive(Debug)]
pub struct DataSourceMapper<'a> {
    refs: RefResolver<'a>,
    data_sources: BTreeMap<&'a str, ExploredDataSource<'a>>,
}

impl<'a> DataSourceMapper<'a> {
    /// Creates a mapper over already-explored data sources.
    pub fn new(
        refs: RefResolver<'a>,
        data_sources: BTreeMap<&'a str, ExploredDataSource<'a>>,
    ) -> Self {
        Self { refs, data_sources }
    }
}

impl EntityMapper for DataSourceMapper<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::DataSource
    }

    fn names(&self) -> Vec<&str> {
        self.data_sources.keys().copied().collect()
    }

    fn map_attributes(&self, name: &str) -> MapperResult<Vec<Attribute>> {
        let data_source = self
            .data_sources
            .get(name)
            .ok_or_else(|| MapperError::Explorer(format!("unknown data source '{}'", name)))?;
        let builder = AttributeBuilder::new(self.refs);

        let response = resolve_response_schema(&self.refs, Some(data_source.read.operation))?;
        let response_attributes =
            builder.build_attributes(&response, Some(Computability::Computed))?;

        let parameter_attributes = build_parameter_attributes(
            &self.refs,
            &data_source.read.parameters,
            &data_source.options.attributes.aliases,
            name,
        );

        let mut attributes =
            merge_attributes(&parameter_attributes, [response_attributes.as_slice()]);
        apply_overrides(&mut attributes, &data_source.options.attributes.overrides, name);
        Ok(attributes)
    }
}
