#![deny(missing_docs)]

//! # Response Resolution
//!
//! Logic for selecting the success response body schema of an operation.

use crate::error::{MapperError, MapperResult};
use crate::oas::resolver::{select_media_schema, RefResolver};
use crate::oas::schema::ResolvedSchema;
use utoipa::openapi::path::Operation;

/// Status codes tried before any other `2xx` code, in order.
const PRIORITY_CODES: [&str; 2] = ["200", "201"];

/// Resolves the success response body schema of `operation`.
///
/// Candidate codes are `200`, `201`, then every other code that parses as an
/// integer in `200..=299`, ascending. The first candidate with at least one
/// content entry decides; its media types are chosen like request bodies.
/// Non-numeric and out-of-range codes are ignored.
pub fn resolve_response_schema<'a>(
    refs: &RefResolver<'a>,
    operation: Option<&'a Operation>,
) -> MapperResult<ResolvedSchema<'a>> {
    let responses = &operation.ok_or(MapperError::SchemaNotFound)?.responses.responses;
    if responses.is_empty() {
        return Err(MapperError::SchemaNotFound);
    }

    let codes = success_codes(responses.keys().map(String::as_str));
    for code in codes {
        let Some(response) = responses.get(code) else {
            continue;
        };
        let response = refs.response(response)?;
        if response.content.is_empty() {
            continue;
        }

        let schema =
            select_media_schema(response.content.iter()).ok_or(MapperError::SchemaNotFound)?;
        return ResolvedSchema::resolve(refs, schema);
    }

    Err(MapperError::SchemaNotFound)
}

/// Orders the declared response codes by resolution priority.
fn success_codes<'k>(declared: impl Iterator<Item = &'k str>) -> Vec<&'k str> {
    let declared: Vec<&str> = declared.collect();

    let mut ordered: Vec<&str> = PRIORITY_CODES
        .iter()
        .filter_map(|code| declared.iter().copied().find(|d| d == code))
        .collect();

    let mut remaining: Vec<(u16, &str)> = declared
        .iter()
        .copied()
        .filter(|code| !PRIORITY_CODES.contains(code))
        .filter_map(|code| {
            code.parse::<u16>()
                .ok()
                .filter(|status| (200..=299).contains(status))
                .map(|status| (status, code))
        })
        .collect();
    remaining.sort();

    ordered.extend(remaining.into_iter().map(|(_, code)| code));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::normalize::CoreType;
    use utoipa::openapi::path::OperationBuilder;
    use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
    use utoipa::openapi::{ComponentsBuilder, Content, Ref, RefOr, Response, ResponseBuilder};

    fn media(t: Type, description: &str) -> Content {
        Content::new(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(t)
                .description(Some(description))
                .build(),
        ))))
    }

    fn response(contents: Vec<(&str, Content)>) -> Response {
        contents
            .into_iter()
            .fold(ResponseBuilder::new().description("response"), |b, (m, c)| {
                b.content(m, c)
            })
            .build()
    }

    fn operation(codes: Vec<(&str, Response)>) -> Operation {
        codes
            .into_iter()
            .fold(OperationBuilder::new(), |b, (code, r)| {
                b.response(code, RefOr::T(r))
            })
            .build()
    }

    fn description(op: &Operation) -> Option<String> {
        resolve_response_schema(&RefResolver::default(), Some(op))
            .unwrap()
            .description
    }

    fn is_not_found(op: &Operation) -> bool {
        matches!(
            resolve_response_schema(&RefResolver::default(), Some(op)),
            Err(MapperError::SchemaNotFound)
        )
    }

    #[test]
    fn test_success_code_order() {
        assert_eq!(
            success_codes(["skip-me!", "204", "300", "201", "199", "202", "200"].into_iter()),
            vec!["200", "201", "202", "204"]
        );
    }

    #[test]
    fn test_defaults_to_200_and_application_json() {
        let op = operation(vec![
            (
                "201",
                response(vec![(
                    "application/json",
                    media(Type::Boolean, "this is the wrong one!"),
                )]),
            ),
            (
                "200",
                response(vec![
                    ("application/xml", media(Type::Boolean, "this is the wrong one!")),
                    ("application/json", media(Type::String, "this is the correct one!")),
                ]),
            ),
        ]);

        assert_eq!(description(&op).as_deref(), Some("this is the correct one!"));
    }

    #[test]
    fn test_falls_back_to_201() {
        let op = operation(vec![
            (
                "204",
                response(vec![(
                    "application/json",
                    media(Type::Boolean, "this is the wrong one!"),
                )]),
            ),
            (
                "201",
                response(vec![
                    ("application/xml", media(Type::Boolean, "this is the wrong one!")),
                    ("application/json", media(Type::String, "this is the correct one!")),
                ]),
            ),
        ]);

        assert_eq!(description(&op).as_deref(), Some("this is the correct one!"));
    }

    #[test]
    fn test_falls_back_to_success_code_and_sorted_media_type() {
        let op = operation(vec![
            (
                "304",
                response(vec![(
                    "application/json",
                    media(Type::Boolean, "this is the wrong one!"),
                )]),
            ),
            (
                "204",
                response(vec![
                    ("application/xml", media(Type::Boolean, "this is the wrong one!")),
                    ("application/jay-son", media(Type::String, "this is the correct one!")),
                ]),
            ),
        ]);

        let resolved = resolve_response_schema(&RefResolver::default(), Some(&op)).unwrap();
        assert_eq!(resolved.core_type, CoreType::String);
        assert_eq!(resolved.description.as_deref(), Some("this is the correct one!"));
    }

    #[test]
    fn test_responses_without_content_are_skipped() {
        let op = operation(vec![
            ("200", response(vec![])),
            ("202", response(vec![("application/json", media(Type::Integer, "accepted"))])),
        ]);

        assert_eq!(description(&op).as_deref(), Some("accepted"));
    }

    #[test]
    fn test_response_reference() {
        let components = ComponentsBuilder::new()
            .response(
                "PetResponse",
                RefOr::T(response(vec![(
                    "application/json",
                    media(Type::Object, "a pet"),
                )])),
            )
            .build();
        let op = OperationBuilder::new()
            .response("200", RefOr::Ref(Ref::new("#/components/responses/PetResponse")))
            .build();

        let resolved =
            resolve_response_schema(&RefResolver::new(Some(&components)), Some(&op)).unwrap();
        assert_eq!(resolved.core_type, CoreType::Object);
        assert_eq!(resolved.description.as_deref(), Some("a pet"));
    }

    #[test]
    fn test_schema_not_found_cases() {
        assert!(matches!(
            resolve_response_schema(&RefResolver::default(), None),
            Err(MapperError::SchemaNotFound)
        ));
        assert!(is_not_found(&OperationBuilder::new().build()));

        let ignored_codes = operation(vec![
            (
                "300",
                response(vec![(
                    "application/json",
                    media(Type::String, "this won't be used!"),
                )]),
            ),
            (
                "skip-me!",
                response(vec![(
                    "application/json",
                    media(Type::String, "this won't be used!"),
                )]),
            ),
            (
                "199",
                response(vec![(
                    "application/json",
                    media(Type::String, "this won't be used!"),
                )]),
            ),
        ]);
        assert!(is_not_found(&ignored_codes));

        for code in ["200", "201", "204"] {
            let no_schema = operation(vec![(
                code,
                response(vec![("application/json", Content::new(None::<RefOr<Schema>>))]),
            )]);
            assert!(is_not_found(&no_schema), "code {code} should not resolve");
        }
    }
}
