#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for selecting the one schema that describes a request or response body.
//!
//! Handles:
//! - `$ref` resolution against `components` via [`RefResolver`].
//! - Media-type priority (`application/json`, then sorted fallbacks).
//! - Response-code priority (`200`, `201`, then ascending `2xx`).

pub mod body;
pub mod refs;
pub mod responses;

pub use body::resolve_request_schema;
pub use refs::RefResolver;
pub use responses::resolve_response_schema;

use utoipa::openapi::schema::Schema;
use utoipa::openapi::{Content, RefOr};

/// The preferred media type for request and response bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Selects a body schema from a content map.
///
/// Preference order:
/// 1. `application/json`, when it declares a schema.
/// 2. Every other media type in lexicographic order; first with a schema wins.
pub(crate) fn select_media_schema<'a, I>(content: I) -> Option<&'a RefOr<Schema>>
where
    I: IntoIterator<Item = (&'a String, &'a Content)>,
{
    let mut candidates: Vec<(&'a str, &'a RefOr<Schema>)> = content
        .into_iter()
        .filter_map(|(media_type, media)| {
            media
                .schema
                .as_ref()
                .map(|schema| (media_type.as_str(), schema))
        })
        .collect();

    if let Some((_, schema)) = candidates
        .iter()
        .find(|(media_type, _)| *media_type == JSON_MEDIA_TYPE)
    {
        return Some(*schema);
    }

    candidates.sort_by(|a, b| a.0.cmp(b.0));
    candidates.first().map(|(_, schema)| *schema)
}
