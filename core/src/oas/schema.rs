#![deny(missing_docs)]

//! # Resolved Schemas
//!
//! A normalized, dereferenced view of a raw `utoipa` schema node. Everything
//! the attribute builder needs is read from here; raw union shapes are gone.

use crate::error::MapperResult;
use crate::oas::normalize::{normalize, CoreType};
use crate::oas::resolver::RefResolver;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use utoipa::openapi::schema::{ArrayItems, KnownFormat, Schema, SchemaFormat};
use utoipa::openapi::RefOr;

/// A schema reduced to one concrete type.
#[derive(Clone)]
pub struct ResolvedSchema<'a> {
    /// The single concrete type.
    pub core_type: CoreType,
    /// Whether any null encoding was present.
    pub nullable: bool,
    /// Description, from the override, the effective node, or the union wrapper.
    pub description: Option<String>,
    /// Whether the schema is marked as secret (`format: password`).
    pub sensitive: bool,
    /// Names of required properties (objects only).
    pub required: BTreeSet<&'a str>,
    /// Child property schemas, sorted by name (objects only).
    pub properties: BTreeMap<&'a str, &'a RefOr<Schema>>,
    /// Element schema (arrays only).
    pub items: Option<&'a RefOr<Schema>>,
}

// Manual Debug implementation because utoipa::openapi::RefOr<Schema> does not implement Debug.
impl fmt::Debug for ResolvedSchema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSchema")
            .field("core_type", &self.core_type)
            .field("nullable", &self.nullable)
            .field("description", &self.description)
            .field("sensitive", &self.sensitive)
            .field("required", &self.required)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("items", &self.items.map(|_| "Schema(..)"))
            .finish()
    }
}

impl<'a> ResolvedSchema<'a> {
    /// Dereferences and normalizes `schema`.
    pub fn resolve(refs: &RefResolver<'a>, schema: &'a RefOr<Schema>) -> MapperResult<Self> {
        let raw = refs.schema(schema)?;
        let normalized = normalize(refs, raw)?;

        let mut resolved = Self {
            core_type: normalized.core_type,
            nullable: normalized.nullable,
            description: None,
            sensitive: false,
            required: BTreeSet::new(),
            properties: BTreeMap::new(),
            items: None,
        };

        match normalized.node {
            Schema::Object(obj) => {
                resolved.description = obj.description.clone();
                resolved.sensitive = matches!(
                    obj.format,
                    Some(SchemaFormat::KnownFormat(KnownFormat::Password))
                );
                resolved.required = obj.required.iter().map(String::as_str).collect();
                resolved.properties = obj
                    .properties
                    .iter()
                    .map(|(name, prop)| (name.as_str(), prop))
                    .collect();
            }
            Schema::Array(arr) => {
                resolved.description = arr.description.clone();
                resolved.items = match &arr.items {
                    ArrayItems::RefOrSchema(item) => Some(&**item),
                    _ => None,
                };
            }
            _ => {}
        }

        if resolved.description.is_none() {
            resolved.description = union_description(raw);
        }

        Ok(resolved)
    }

    /// Replaces the description when `description` is set.
    pub fn with_description_override(mut self, description: Option<&str>) -> Self {
        if let Some(description) = description {
            self.description = Some(description.to_string());
        }
        self
    }

    /// Whether `name` is listed in this object's required set.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

fn union_description(schema: &Schema) -> Option<String> {
    match schema {
        Schema::OneOf(one_of) => one_of.description.clone(),
        Schema::AnyOf(any_of) => any_of.description.clone(),
        _ => None,
    }
}
