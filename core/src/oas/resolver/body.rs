#![deny(missing_docs)]

//! # Body Resolution
//!
//! Logic for selecting the request body schema of an operation.

use crate::error::{MapperError, MapperResult};
use crate::oas::resolver::{select_media_schema, RefResolver};
use crate::oas::schema::ResolvedSchema;
use utoipa::openapi::path::Operation;

/// Resolves the request body schema of `operation`.
///
/// Fails with [`MapperError::SchemaNotFound`] when the operation is absent, has
/// no request body, has an empty content map, or no media type declares a schema.
pub fn resolve_request_schema<'a>(
    refs: &RefResolver<'a>,
    operation: Option<&'a Operation>,
) -> MapperResult<ResolvedSchema<'a>> {
    let body = operation
        .and_then(|op| op.request_body.as_ref())
        .ok_or(MapperError::SchemaNotFound)?;

    let schema = select_media_schema(body.content.iter()).ok_or(MapperError::SchemaNotFound)?;
    ResolvedSchema::resolve(refs, schema)
}
