#![deny(missing_docs)]

//! # OpenAPI Schema Lowering
//!
//! - **document**: Loading YAML/JSON documents into the `utoipa` model.
//! - **normalize**: Collapsing null encodings into one concrete type.
//! - **schema**: The dereferenced, normalized schema view.
//! - **resolver**: Reference lookup and request/response body selection.
//! - **builder**: Attribute tree construction.

pub mod builder;
pub mod document;
pub mod normalize;
pub mod resolver;
pub mod schema;

pub use builder::{AttributeBuilder, MAX_NESTING_DEPTH};
pub use document::load_document;
pub use normalize::{normalize, CoreType, Normalized};
pub use resolver::{resolve_request_schema, resolve_response_schema, RefResolver};
pub use schema::ResolvedSchema;
