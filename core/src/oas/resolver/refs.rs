#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Dereferences `$ref` pointers against the document's `components`.
//! Only local component references (`#/components/schemas/...` and
//! `#/components/responses/...`) are supported.

use crate::error::{MapperError, MapperResult};
use std::fmt;
use utoipa::openapi::schema::Schema;
use utoipa::openapi::{Components, OpenApi, RefOr, Response};

const SCHEMA_PREFIX: &str = "#/components/schemas/";
const RESPONSE_PREFIX: &str = "#/components/responses/";

/// Read-only view over the document components used to follow `$ref`s.
#[derive(Clone, Copy, Default)]
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

// Manual Debug implementation because utoipa::openapi::Components does not implement Debug.
impl fmt::Debug for RefResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefResolver")
            .field("components", &self.components.map(|_| "Components(..)"))
            .finish()
    }
}

impl<'a> RefResolver<'a> {
    /// Creates a resolver over optional components.
    pub fn new(components: Option<&'a Components>) -> Self {
        Self { components }
    }

    /// Creates a resolver over the components of a parsed document.
    pub fn for_document(document: &'a OpenApi) -> Self {
        Self::new(document.components.as_ref())
    }

    /// Follows a schema `$ref` chain until an inline schema is reached.
    pub fn schema(&self, schema: &'a RefOr<Schema>) -> MapperResult<&'a Schema> {
        let mut current = schema;
        let mut visited: Vec<&'a str> = Vec::new();
        loop {
            match current {
                RefOr::T(inline) => return Ok(inline),
                RefOr::Ref(r) => {
                    let location = r.ref_location.as_str();
                    if visited.contains(&location) {
                        return Err(MapperError::CyclicReference(location.to_string()));
                    }
                    visited.push(location);

                    let name = location
                        .strip_prefix(SCHEMA_PREFIX)
                        .ok_or_else(|| MapperError::UnresolvedReference(location.to_string()))?;
                    current = self
                        .components
                        .and_then(|c| c.schemas.get(name))
                        .ok_or_else(|| MapperError::UnresolvedReference(location.to_string()))?;
                }
            }
        }
    }

    /// Resolves a response that may be a `$ref` to `components/responses`.
    pub fn response(&self, response: &'a RefOr<Response>) -> MapperResult<&'a Response> {
        let mut current = response;
        let mut visited: Vec<&'a str> = Vec::new();
        loop {
            match current {
                RefOr::T(inline) => return Ok(inline),
                RefOr::Ref(r) => {
                    let location = r.ref_location.as_str();
                    if visited.contains(&location) {
                        return Err(MapperError::CyclicReference(location.to_string()));
                    }
                    visited.push(location);

                    let name = location
                        .strip_prefix(RESPONSE_PREFIX)
                        .ok_or_else(|| MapperError::UnresolvedReference(location.to_string()))?;
                    current = self
                        .components
                        .and_then(|c| c.responses.get(name))
                        .ok_or_else(|| MapperError::UnresolvedReference(location.to_string()))?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::{ObjectBuilder, Type};
    use utoipa::openapi::{ComponentsBuilder, Ref};

    fn components() -> Components {
        ComponentsBuilder::new()
            .schema(
                "Pet",
                RefOr::T(Schema::Object(
                    ObjectBuilder::new().schema_type(Type::Object).build(),
                )),
            )
            .schema("PetAlias", RefOr::Ref(Ref::new("#/components/schemas/Pet")))
            .schema("Loop", RefOr::Ref(Ref::new("#/components/schemas/Loop")))
            .build()
    }

    #[test]
    fn test_inline_schema_is_returned_directly() {
        let resolver = RefResolver::default();
        let inline = RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(Type::String).build(),
        ));
        assert!(matches!(resolver.schema(&inline), Ok(Schema::Object(_))));
    }

    #[test]
    fn test_follows_reference_chain() {
        let components = components();
        let resolver = RefResolver::new(Some(&components));
        let reference = RefOr::Ref(Ref::new("#/components/schemas/PetAlias"));

        match resolver.schema(&reference) {
            Ok(Schema::Object(obj)) => {
                assert!(matches!(
                    obj.schema_type,
                    utoipa::openapi::schema::SchemaType::Type(Type::Object)
                ));
            }
            _ => panic!("PetAlias should resolve to the Pet object"),
        }
    }

    #[test]
    fn test_missing_reference_errors() {
        let components = components();
        let resolver = RefResolver::new(Some(&components));
        let reference = RefOr::Ref(Ref::new("#/components/schemas/Missing"));

        assert!(matches!(
            resolver.schema(&reference),
            Err(MapperError::UnresolvedReference(loc)) if loc == "#/components/schemas/Missing"
        ));
    }

    #[test]
    fn test_reference_without_components_errors() {
        let reference = RefOr::Ref(Ref::new("#/components/schemas/Pet"));
        assert!(matches!(
            RefResolver::default().schema(&reference),
            Err(MapperError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn test_cyclic_reference_errors() {
        let components = components();
        let resolver = RefResolver::new(Some(&components));
        let reference = RefOr::Ref(Ref::new("#/components/schemas/Loop"));

        assert!(matches!(
            resolver.schema(&reference),
            Err(MapperError::CyclicReference(_))
        ));
    }
}
