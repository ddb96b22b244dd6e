#![deny(missing_docs)]

//! # Attribute Builder
//!
//! Turns resolved schemas into attribute trees.
//!
//! Dispatch is an exhaustive `match` over [`CoreType`]:
//! - primitives become `String` / `Integer` / `Number` / `Boolean` attributes,
//! - arrays of objects become `ListNested`, other arrays become `List`,
//! - objects become `SingleNested`.
//!
//! Object properties are always visited in lexicographic order.

use crate::error::{MapperError, MapperResult};
use crate::ir::{Attribute, AttributeKind, Computability, ElementType, ObjectAttributeType};
use crate::oas::normalize::CoreType;
use crate::oas::resolver::RefResolver;
use crate::oas::schema::ResolvedSchema;

/// Deepest attribute nesting accepted before giving up.
///
/// Self-referencing component schemas would otherwise recurse forever.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Builds attributes from resolved schemas.
#[derive(Debug, Clone, Copy)]
pub struct AttributeBuilder<'a> {
    refs: RefResolver<'a>,
}

impl<'a> AttributeBuilder<'a> {
    /// Creates a builder that resolves nested `$ref`s through `refs`.
    pub fn new(refs: RefResolver<'a>) -> Self {
        Self { refs }
    }

    /// Builds the ordered child attributes of an object schema.
    ///
    /// `computability_override` applies to this level only; nested children
    /// are always classified by their parent's required set.
    pub fn build_attributes(
        &self,
        schema: &ResolvedSchema<'a>,
        computability_override: Option<Computability>,
    ) -> MapperResult<Vec<Attribute>> {
        if schema.core_type != CoreType::Object {
            return Err(MapperError::UnsupportedType(format!(
                "{} (expected object)",
                schema.core_type
            )));
        }
        self.object_attributes(schema, computability_override, 0)
    }

    /// Builds a single named attribute from `schema`.
    pub fn build_attribute(
        &self,
        schema: &ResolvedSchema<'a>,
        name: &str,
        computability: Computability,
    ) -> MapperResult<Attribute> {
        self.attribute(schema, name, computability, 0)
    }

    fn attribute(
        &self,
        schema: &ResolvedSchema<'a>,
        name: &str,
        computability: Computability,
        depth: usize,
    ) -> MapperResult<Attribute> {
        check_depth(depth)?;

        let kind = match schema.core_type {
            CoreType::String => AttributeKind::String,
            CoreType::Integer => AttributeKind::Integer,
            CoreType::Number => AttributeKind::Number,
            CoreType::Boolean => AttributeKind::Boolean,
            CoreType::Array => self.list_kind(schema, depth)?,
            CoreType::Object => self.single_nested_kind(schema, depth)?,
        };

        Ok(Attribute {
            name: name.to_string(),
            kind,
            computability,
            description: schema.description.clone(),
            sensitive: schema.sensitive,
        })
    }

    fn single_nested_kind(
        &self,
        schema: &ResolvedSchema<'a>,
        depth: usize,
    ) -> MapperResult<AttributeKind> {
        Ok(AttributeKind::SingleNested {
            attributes: self.object_attributes(schema, None, depth + 1)?,
        })
    }

    fn list_kind(&self, schema: &ResolvedSchema<'a>, depth: usize) -> MapperResult<AttributeKind> {
        let items = self.items(schema)?;
        match items.core_type {
            CoreType::Object => Ok(AttributeKind::ListNested {
                attributes: self.object_attributes(&items, None, depth + 1)?,
            }),
            _ => Ok(AttributeKind::List {
                element_type: self.element_type(&items, depth + 1)?,
            }),
        }
    }

    fn object_attributes(
        &self,
        schema: &ResolvedSchema<'a>,
        computability_override: Option<Computability>,
        depth: usize,
    ) -> MapperResult<Vec<Attribute>> {
        check_depth(depth)?;

        let mut attributes = Vec::with_capacity(schema.properties.len());
        for (&name, &property) in &schema.properties {
            let computability = computability_override.unwrap_or(if schema.is_required(name) {
                Computability::Required
            } else {
                Computability::ComputedOptional
            });

            let attribute = ResolvedSchema::resolve(&self.refs, property)
                .and_then(|child| self.attribute(&child, name, computability, depth))
                .map_err(|err| err.in_attribute(name))?;
            attributes.push(attribute);
        }

        Ok(attributes)
    }

    fn element_type(&self, schema: &ResolvedSchema<'a>, depth: usize) -> MapperResult<ElementType> {
        check_depth(depth)?;

        let element_type = match schema.core_type {
            CoreType::String => ElementType::String,
            CoreType::Integer => ElementType::Integer,
            CoreType::Number => ElementType::Number,
            CoreType::Boolean => ElementType::Boolean,
            CoreType::Array => {
                let items = self.items(schema)?;
                ElementType::List {
                    element_type: Box::new(self.element_type(&items, depth + 1)?),
                }
            }
            CoreType::Object => {
                let mut attribute_types = Vec::with_capacity(schema.properties.len());
                for (&name, &property) in &schema.properties {
                    let element_type = ResolvedSchema::resolve(&self.refs, property)
                        .and_then(|child| self.element_type(&child, depth + 1))
                        .map_err(|err| err.in_attribute(name))?;
                    attribute_types.push(ObjectAttributeType {
                        name: name.to_string(),
                        element_type,
                    });
                }
                ElementType::Object { attribute_types }
            }
        };

        Ok(element_type)
    }

    fn items(&self, schema: &ResolvedSchema<'a>) -> MapperResult<ResolvedSchema<'a>> {
        let items = schema
            .items
            .ok_or_else(|| MapperError::UnsupportedType("array without items".to_string()))?;
        ResolvedSchema::resolve(&self.refs, items)
    }
}

fn check_depth(depth: usize) -> MapperResult<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(MapperError::NestingTooDeep(MAX_NESTING_DEPTH));
    }
    Ok(())
}
