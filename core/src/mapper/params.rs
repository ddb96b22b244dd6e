//! # Parameter Attributes
//!
//! Builds attributes from the `path` and `query` parameters of an operation.
//! Header and cookie parameters are ignored; so are `style`/`explode`.

use crate::error::{MapperError, MapperResult};
use crate::ir::{merge_attributes, Attribute, Computability};
use crate::oas::{AttributeBuilder, RefResolver, ResolvedSchema};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use utoipa::openapi::path::{Parameter, ParameterIn};
use utoipa::openapi::Required;

/// Builds one attribute per usable parameter, in parameter order.
///
/// A parameter that fails to build is logged and dropped. `aliases` renames
/// parameters; when two parameters end up with the same name the first wins.
pub fn build_parameter_attributes<'a>(
    refs: &RefResolver<'a>,
    parameters: &[&'a Parameter],
    aliases: &BTreeMap<String, String>,
    entity: &str,
) -> Vec<Attribute> {
    let mut attributes = Vec::with_capacity(parameters.len());

    for &parameter in parameters {
        if !matches!(parameter.parameter_in, ParameterIn::Path | ParameterIn::Query) {
            debug!(entity, parameter = %parameter.name, "ignoring non path/query parameter");
            continue;
        }

        match build_parameter_attribute(refs, parameter, aliases) {
            Ok(attribute) => attributes.push(attribute),
            Err(err) => warn!(entity, error = %err, "skipping parameter attribute"),
        }
    }

    merge_attributes(&[], [attributes.as_slice()])
}

fn build_parameter_attribute<'a>(
    refs: &RefResolver<'a>,
    parameter: &'a Parameter,
    aliases: &BTreeMap<String, String>,
) -> MapperResult<Attribute> {
    let computability = match parameter.required {
        Required::True => Computability::Required,
        _ => Computability::ComputedOptional,
    };
    let name = aliases.get(&parameter.name).unwrap_or(&parameter.name);

    let schema = parameter
        .schema
        .as_ref()
        .ok_or(MapperError::SchemaNotFound)
        .map_err(|err| err.in_attribute(&parameter.name))?;

    ResolvedSchema::resolve(refs, schema)
        .map(|resolved| resolved.with_description_override(parameter.description.as_deref()))
        .and_then(|resolved| {
            AttributeBuilder::new(*refs).build_attribute(&resolved, name, computability)
        })
        .map_err(|err| err.in_attribute(&parameter.name))
}
