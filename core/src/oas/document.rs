#![deny(missing_docs)]

//! # Document Loading
//!
//! Parses an OpenAPI document (YAML or JSON) into the `utoipa` model.
//!
//! The raw document goes through a `serde_json::Value` first so a few
//! compatibility gaps of the `utoipa` model can be patched:
//!
//! - `utoipa` only accepts `openapi: 3.1.x`; 3.0 and 3.2 documents are relabelled.
//! - OpenAPI 3.0 `nullable: true` (and Swagger's `x-nullable`) is rewritten into
//!   the 3.1 type-array form, or into `anyOf` with a null branch when the schema
//!   has no `type` (e.g. a bare `$ref`).
//! - `utoipa` path items and operations only hold inline parameters, so
//!   `#/components/parameters/` references are replaced by their targets.

use crate::error::{MapperError, MapperResult};
use serde_json::{json, Map, Value};
use utoipa::openapi::OpenApi;

const MODEL_VERSION: &str = "3.1.0";
const PARAMETER_PREFIX: &str = "#/components/parameters/";
const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Parses `content` (YAML, or JSON which is valid YAML) into an [`OpenApi`] document.
pub fn load_document(content: &str) -> MapperResult<OpenApi> {
    let mut value: Value = serde_yaml::from_str(content)
        .map_err(|e| MapperError::Document(format!("failed to parse YAML: {}", e)))?;

    if !value.is_object() {
        return Err(MapperError::Document(
            "document root must be a mapping".to_string(),
        ));
    }

    pin_version(&mut value)?;
    inline_parameter_refs(&mut value)?;
    rewrite_nullable_flags(&mut value);

    serde_json::from_value(value).map_err(|e| MapperError::Document(e.to_string()))
}

fn pin_version(value: &mut Value) -> MapperResult<()> {
    let Some(version) = value.get_mut("openapi") else {
        return Err(MapperError::Document(
            "missing 'openapi' version field".to_string(),
        ));
    };

    match version.as_str() {
        Some(v) if v.starts_with("3.") => {
            *version = json!(MODEL_VERSION);
            Ok(())
        }
        Some(v) => Err(MapperError::Document(format!(
            "unsupported OpenAPI version '{}'",
            v
        ))),
        None => Err(MapperError::Document(
            "'openapi' version must be a string".to_string(),
        )),
    }
}

/// Replaces parameter `$ref`s in path items and operations with the
/// `components.parameters` entry they point at, following chains.
fn inline_parameter_refs(value: &mut Value) -> MapperResult<()> {
    let components = value
        .pointer("/components/parameters")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let Some(paths) = value.get_mut("paths").and_then(Value::as_object_mut) else {
        return Ok(());
    };

    for item in paths.values_mut() {
        let Some(item) = item.as_object_mut() else {
            continue;
        };
        if let Some(parameters) = item.get_mut("parameters") {
            inline_parameter_list(parameters, &components)?;
        }
        for key in OPERATION_KEYS {
            if let Some(parameters) = item
                .get_mut(key)
                .and_then(|operation| operation.get_mut("parameters"))
            {
                inline_parameter_list(parameters, &components)?;
            }
        }
    }
    Ok(())
}

fn inline_parameter_list(
    parameters: &mut Value,
    components: &Map<String, Value>,
) -> MapperResult<()> {
    let Some(parameters) = parameters.as_array_mut() else {
        return Ok(());
    };

    for parameter in parameters.iter_mut() {
        let mut visited: Vec<String> = Vec::new();
        while let Some(reference) = parameter.get("$ref").and_then(Value::as_str) {
            let reference = reference.to_string();
            if visited.contains(&reference) {
                return Err(MapperError::Document(format!(
                    "cyclic parameter reference '{}'",
                    reference
                )));
            }

            let target = reference
                .strip_prefix(PARAMETER_PREFIX)
                .and_then(|name| components.get(name))
                .ok_or_else(|| {
                    MapperError::Document(format!(
                        "unresolved parameter reference '{}'",
                        reference
                    ))
                })?;
            *parameter = target.clone();
            visited.push(reference);
        }
    }
    Ok(())
}

/// Rewrites every `nullable: true` / `x-nullable: true` flag in place.
pub(crate) fn rewrite_nullable_flags(value: &mut Value) {
    if let Value::Object(map) = value {
        if let Some(replacement) = apply_nullable_flag(map) {
            *value = replacement;
        }
    }

    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                // Literal payloads are not schemas.
                if matches!(key.as_str(), "example" | "examples" | "default" | "enum") {
                    continue;
                }
                rewrite_nullable_flags(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                rewrite_nullable_flags(v);
            }
        }
        _ => {}
    }
}

fn apply_nullable_flag(map: &mut Map<String, Value>) -> Option<Value> {
    let flagged = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
    if !(flagged("nullable") || flagged("x-nullable")) {
        // A non-boolean `nullable` key is a property or component name.
        return None;
    }
    map.remove("nullable");
    map.remove("x-nullable");

    match map.get_mut("type") {
        Some(declared) if declared.is_string() => {
            if declared.as_str() != Some("null") {
                let concrete = declared.take();
                *declared = json!([concrete, "null"]);
            }
            None
        }
        Some(Value::Array(types)) => {
            if !types.iter().any(|t| t.as_str() == Some("null")) {
                types.push(json!("null"));
            }
            None
        }
        _ => {
            let original = Value::Object(std::mem::take(map));
            Some(json!({ "anyOf": [original, { "type": "null" }] }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nullable_string_becomes_type_array() {
        let mut value = json!({ "type": "string", "nullable": true, "description": "d" });
        rewrite_nullable_flags(&mut value);
        assert_eq!(
            value,
            json!({ "type": ["string", "null"], "description": "d" })
        );
    }

    #[test]
    fn test_x_nullable_appends_to_existing_type_array() {
        let mut value = json!({ "type": ["integer"], "x-nullable": true });
        rewrite_nullable_flags(&mut value);
        assert_eq!(value, json!({ "type": ["integer", "null"] }));
    }

    #[test]
    fn test_nullable_ref_is_wrapped_in_any_of() {
        let mut value = json!({
            "properties": {
                "owner": { "$ref": "#/components/schemas/User", "nullable": true }
            }
        });
        rewrite_nullable_flags(&mut value);
        assert_eq!(
            value["properties"]["owner"],
            json!({ "anyOf": [{ "$ref": "#/components/schemas/User" }, { "type": "null" }] })
        );
    }

    #[test]
    fn test_false_flag_leaves_schema_alone() {
        let mut value = json!({ "type": "string", "nullable": false });
        rewrite_nullable_flags(&mut value);
        assert_eq!(value, json!({ "type": "string", "nullable": false }));
    }

    #[test]
    fn test_properties_named_nullable_are_kept() {
        let mut value = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "nullable": { "type": "boolean" },
                "x-nullable": { "type": "string" }
            }
        });
        let expected = value.clone();
        rewrite_nullable_flags(&mut value);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_examples_are_untouched() {
        let mut value = json!({
            "type": "object",
            "example": { "nullable": true }
        });
        let expected = value.clone();
        rewrite_nullable_flags(&mut value);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_load_openapi_30_document() {
        let yaml = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pet:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  name:
                    type: string
                    nullable: true
"#;
        let doc = load_document(yaml).unwrap();
        assert_eq!(doc.info.title, "Petstore");
        assert!(doc.paths.paths.contains_key("/pet"));
    }

    const PARAMETER_REFS: &str = r##"
openapi: 3.0.3
info: { title: Petstore, version: 1.0.0 }
paths:
  /pet/{petId}:
    parameters:
      - $ref: "#/components/parameters/PetId"
    get:
      parameters:
        - $ref: "#/components/parameters/Verbose"
      responses:
        "200": { description: ok }
components:
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      schema: { type: integer }
    Verbose:
      $ref: "#/components/parameters/VerboseFlag"
    VerboseFlag:
      name: verbose
      in: query
      schema: { type: boolean, nullable: true }
"##;

    #[test]
    fn test_parameter_refs_are_inlined() {
        let doc = load_document(PARAMETER_REFS).unwrap();
        let item = &doc.paths.paths["/pet/{petId}"];

        let common: Vec<_> = item
            .parameters
            .iter()
            .flatten()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(common, vec!["petId"]);

        let operation: Vec<_> = item
            .get
            .as_ref()
            .and_then(|op| op.parameters.as_ref())
            .into_iter()
            .flatten()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(operation, vec!["verbose"]);
    }

    #[test]
    fn test_unresolved_parameter_ref_is_rejected() {
        let yaml = PARAMETER_REFS.replace(
            "- $ref: \"#/components/parameters/PetId\"",
            "- $ref: \"#/components/parameters/Missing\"",
        );
        let err = load_document(&yaml).unwrap_err();
        assert!(err.to_string().contains("#/components/parameters/Missing"));
    }

    #[test]
    fn test_cyclic_parameter_ref_is_rejected() {
        let yaml = PARAMETER_REFS.replace(
            "$ref: \"#/components/parameters/VerboseFlag\"",
            "$ref: \"#/components/parameters/Verbose\"",
        );
        assert!(matches!(
            load_document(&yaml),
            Err(MapperError::Document(message)) if message.starts_with("cyclic")
        ));
    }

    #[test]
    fn test_rejects_swagger_2() {
        let yaml = "swagger: '2.0'\ninfo: {title: t, version: v}\npaths: {}\n";
        assert!(matches!(load_document(yaml), Err(MapperError::Document(_))));

        let yaml = "openapi: 2.0.0\ninfo: {title: t, version: v}\npaths: {}\n";
        assert!(matches!(load_document(yaml), Err(MapperError::Document(_))));
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        assert!(matches!(
            load_document("- just\n- a list\n"),
            Err(MapperError::Document(_))
        ));
    }
}
