#![deny(missing_docs)]

//! # Nullability Normalization
//!
//! OpenAPI has three ways of saying "this value may be null":
//!
//! - a type array with `"null"`: `type: [string, "null"]`
//! - `anyOf` with a `{type: null}` branch
//! - `oneOf` with a `{type: null}` branch
//!
//! [`normalize`] collapses all three into a single concrete [`CoreType`] plus a
//! `nullable` flag, and points at the node constraints should be read from.
//! Nothing downstream inspects union shapes again.

use crate::error::{MapperError, MapperResult};
use crate::oas::resolver::RefResolver;
use derive_more::Display;
use utoipa::openapi::schema::{Schema, SchemaType, Type};
use utoipa::openapi::RefOr;

/// The six schema kinds that map onto attributes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreType {
    /// `string`
    #[display("string")]
    String,
    /// `integer`
    #[display("integer")]
    Integer,
    /// `number`
    #[display("number")]
    Number,
    /// `boolean`
    #[display("boolean")]
    Boolean,
    /// `array`
    #[display("array")]
    Array,
    /// `object`
    #[display("object")]
    Object,
}

/// Result of normalizing a schema node.
#[derive(Clone, Copy)]
pub struct Normalized<'a> {
    /// The single concrete type.
    pub core_type: CoreType,
    /// Whether a null encoding was present.
    pub nullable: bool,
    /// The node to read description, properties and items from.
    pub node: &'a Schema,
}

/// Reduces `schema` to a single concrete type and a nullable flag.
///
/// Rules, in order:
/// 1. A two-entry type array containing `null` is nullable; the other entry wins.
/// 2. An `anyOf`/`oneOf` with exactly two branches, one of which is `{type: null}`,
///    is nullable; the other branch wins.
/// 3. A single concrete type is not nullable.
/// 4. Anything else fails with [`MapperError::UnsupportedType`].
pub fn normalize<'a>(refs: &RefResolver<'a>, schema: &'a Schema) -> MapperResult<Normalized<'a>> {
    match schema {
        Schema::Object(obj) => normalize_declared(schema, &obj.schema_type, false),
        Schema::Array(arr) => normalize_declared(schema, &arr.schema_type, true),
        Schema::OneOf(one_of) => normalize_union(refs, &one_of.items, "oneOf"),
        Schema::AnyOf(any_of) => normalize_union(refs, &any_of.items, "anyOf"),
        _ => Err(MapperError::UnsupportedType("allOf".to_string())),
    }
}

fn normalize_declared<'a>(
    node: &'a Schema,
    schema_type: &'a SchemaType,
    is_array_node: bool,
) -> MapperResult<Normalized<'a>> {
    let types = type_set(schema_type);
    let concrete: Vec<&Type> = types.iter().filter(|t| !is_null_type(t)).collect();

    match (types.len(), concrete.as_slice()) {
        (2, [t]) => Ok(Normalized {
            core_type: core_type(t)?,
            nullable: true,
            node,
        }),
        (1, [t]) => Ok(Normalized {
            core_type: core_type(t)?,
            nullable: false,
            node,
        }),
        // An `items`-bearing schema without an explicit `type`.
        (0, []) if is_array_node => Ok(Normalized {
            core_type: CoreType::Array,
            nullable: false,
            node,
        }),
        _ => Err(MapperError::UnsupportedType(describe_types(types))),
    }
}

fn normalize_union<'a>(
    refs: &RefResolver<'a>,
    branches: &'a [RefOr<Schema>],
    keyword: &str,
) -> MapperResult<Normalized<'a>> {
    if branches.len() != 2 {
        return Err(MapperError::UnsupportedType(format!(
            "{keyword} with {} branches",
            branches.len()
        )));
    }

    let mut null_branches = 0;
    let mut concrete = Vec::with_capacity(1);
    for branch in branches {
        let schema = refs.schema(branch)?;
        if is_null_schema(schema) {
            null_branches += 1;
        } else {
            concrete.push(schema);
        }
    }

    match (null_branches, concrete.as_slice()) {
        (1, [other]) => {
            let inner = normalize(refs, *other)?;
            Ok(Normalized {
                nullable: true,
                ..inner
            })
        }
        _ => Err(MapperError::UnsupportedType(format!(
            "{keyword} without exactly one null branch"
        ))),
    }
}

fn type_set(schema_type: &SchemaType) -> &[Type] {
    match schema_type {
        SchemaType::Type(t) => std::slice::from_ref(t),
        SchemaType::Array(types) => types.as_slice(),
        _ => &[],
    }
}

fn is_null_type(t: &Type) -> bool {
    matches!(t, Type::Null)
}

fn is_null_schema(schema: &Schema) -> bool {
    match schema {
        Schema::Object(obj) => matches!(type_set(&obj.schema_type), [t] if is_null_type(t)),
        _ => false,
    }
}

fn core_type(t: &Type) -> MapperResult<CoreType> {
    match t {
        Type::String => Ok(CoreType::String),
        Type::Integer => Ok(CoreType::Integer),
        Type::Number => Ok(CoreType::Number),
        Type::Boolean => Ok(CoreType::Boolean),
        Type::Array => Ok(CoreType::Array),
        Type::Object => Ok(CoreType::Object),
        other => Err(MapperError::UnsupportedType(type_name(other).to_string())),
    }
}

fn type_name(t: &Type) -> &'static str {
    match t {
        Type::String => "string",
        Type::Integer => "integer",
        Type::Number => "number",
        Type::Boolean => "boolean",
        Type::Array => "array",
        Type::Object => "object",
        Type::Null => "null",
        #[allow(unreachable_patterns)]
        _ => "unknown",
    }
}

fn describe_types(types: &[Type]) -> String {
    if types.is_empty() {
        return "none".to_string();
    }
    types.iter().map(type_name).collect::<Vec<_>>().join(", ")
}
