#![deny(missing_docs)]

//! # Resource Mapper
//!
//! A resource is described by, in merge priority order:
//! 1. the create request body (required), whose required set drives computability,
//! 2. the create response body (optional), top level forced `Computed`,
//! 3. the read response body (optional), top level forced `Computed`,
//! 4. the read operation's path/query parameters (optional).
//!
//! Config overrides are applied to the merged tree.

use crate::error::{MapperError, MapperResult};
use crate::explorer::{ExploredOperation, ExploredResource};
use crate::ir::{merge_attributes, Attribute, Computability, EntityKind};
use crate::mapper::overrides::apply_overrides;
use crate::mapper::params::build_parameter_attributes;
use crate::mapper::EntityMapper;
use crate::oas::{resolve_request_schema, resolve_response_schema, AttributeBuilder, RefResolver};
use std::collections::BTreeMap;
use tracing::debug;

/// Maps explored resources into IR.
#[derive(Debug)]
pub struct ResourceMapper<'a> {
    refs: RefResolver<'a>,
    resources: BTreeMap<&'a str, ExploredResource<'a>>,
}

impl<'a> ResourceMapper<'a> {
    /// Creates a mapper over already-explored resources.
    pub fn new(refs: RefResolver<'a>, resources: BTreeMap<&'a str, ExploredResource<'a>>) -> Self {
        Self { refs, resources }
    }

    fn response_attributes(
        &self,
        name: &str,
        source: &str,
        operation: &ExploredOperation<'a>,
    ) -> Vec<Attribute> {
        let attributes = resolve_response_schema(&self.refs, Some(operation.operation)).and_then(
            |schema| {
                AttributeBuilder::new(self.refs)
                    .build_attributes(&schema, Some(Computability::Computed))
            },
        );

        match attributes {
            Ok(attributes) => attributes,
            Err(err) => {
                debug!(entity = name, source, error = %err, "optional schema contributes nothing");
                Vec::new()
            }
        }
    }
}

impl EntityMapper for ResourceMapper<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::Resource
    }

    fn names(&self) -> Vec<&str> {
        self.resources.keys().copied().collect()
    }

    fn map_attributes(&self, name: &str) -> MapperResult<Vec<Attribute>> {
        let resource = self
            .resources
            .get(name)
            .ok_or_else(|| MapperError::Explorer(format!("unknown resource '{}'", name)))?;

        let request = resolve_request_schema(&self.refs, Some(resource.create.operation))?;
        let request_attributes =
            AttributeBuilder::new(self.refs).build_attributes(&request, None)?;

        let create_response = self.response_attributes(name, "create response", &resource.create);
        let read_response = self.response_attributes(name, "read response", &resource.read);
        let read_parameters = build_parameter_attributes(
            &self.refs,
            &resource.read.parameters,
            &resource.options.attributes.aliases,
            name,
        );

        let mut attributes = merge_attributes(
            &request_attributes,
            [
                create_response.as_slice(),
                read_response.as_slice(),
                read_parameters.as_slice(),
            ],
        );
        apply_overrides(&mut attributes, &resource.options.attributes.overrides, name);
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::explorer::ConfigExplorer;
    use crate::ir::AttributeKind;
    use crate::oas::load_document;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r##"
openapi: 3.1.0
info: { title: Petstore, version: 1.0.0 }
paths:
  /pet:
    post:
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/NewPet" }
      responses:
        "201":
          description: created
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Pet" }
  /pet/{petId}:
    get:
      parameters:
        - name: petId
          in: path
          required: true
          description: ID of pet
          schema: { type: integer }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Pet" }
  /orphan:
    post:
      responses:
        "200": { description: ok }
components:
  schemas:
    NewPet:
      type: object
      required: [name]
      properties:
        name: { type: string, description: pet name }
        password: { type: string, format: password }
        owner:
          type: object
          properties:
            email: { type: string }
    Pet:
      type: object
      properties:
        id: { type: integer, description: pet id }
        name: { type: string, description: response name }
        owner:
          type: object
          properties:
            email: { type: string }
            since: { type: string }
"##;

    const CONFIG: &str = r##"
provider: { name: petstore }
resources:
  pet:
    create: { path: /pet, method: POST }
    read: { path: "/pet/{petId}", method: GET }
    schema:
      attributes:
        aliases: { petId: id }
        overrides:
          owner.email: { sensitive: true }
  orphan:
    create: { path: /orphan, method: POST }
    read: { path: "/pet/{petId}", method: GET }
"##;

    fn mapper<'a>(
        document: &'a utoipa::openapi::OpenApi,
        config: &'a Config,
    ) -> ResourceMapper<'a> {
        let resources = ConfigExplorer::new(document, config)
            .resources()
            .into_iter()
            .map(|(name, explored)| (name, explored.unwrap()))
            .collect();
        ResourceMapper::new(RefResolver::for_document(document), resources)
    }

    fn string(name: &str, computability: Computability) -> Attribute {
        Attribute::new(name, AttributeKind::String, computability)
    }

    #[test]
    fn test_request_first_then_responses_then_parameters() {
        let document = load_document(DOCUMENT).unwrap();
        let config = Config::parse(CONFIG).unwrap();

        let attributes = mapper(&document, &config).map_attributes("pet").unwrap();

        let mut email = string("email", Computability::ComputedOptional);
        email.sensitive = true;
        let mut password = string("password", Computability::ComputedOptional);
        password.sensitive = true;

        assert_eq!(
            attributes,
            vec![
                string("name", Computability::Required)
                    .with_description(Some("pet name".into())),
                Attribute::new(
                    "owner",
                    AttributeKind::SingleNested {
                        attributes: vec![
                            email,
                            string("since", Computability::ComputedOptional),
                        ],
                    },
                    Computability::ComputedOptional,
                ),
                password,
                Attribute::new("id", AttributeKind::Integer, Computability::Computed)
                    .with_description(Some("pet id".into())),
            ]
        );
    }

    #[test]
    fn test_missing_create_request_skips_resource() {
        let document = load_document(DOCUMENT).unwrap();
        let config = Config::parse(CONFIG).unwrap();
        let mapper = mapper(&document, &config);

        assert!(matches!(
            mapper.map_attributes("orphan"),
            Err(MapperError::SchemaNotFound)
        ));

        let entities = mapper.map_to_ir();
        let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pet"]);
        assert_eq!(entities[0].kind, EntityKind::Resource);
    }
}
