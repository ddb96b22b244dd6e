//! # Error Handling
//!
//! Provides the unified `MapperError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Resolver and builder failures are returned as values and bubble up to the
/// entity mappers, which log and skip the failing entity or parameter.
/// Note: String errors default to `Config`.
#[derive(Debug, Display, From)]
pub enum MapperError {
    /// No usable request/response schema after media-type and status-code priority.
    #[from(ignore)]
    #[display("schema not found")]
    SchemaNotFound,

    /// A schema could not be reduced to one of the six supported kinds.
    #[from(ignore)]
    #[display("invalid schema type '{_0}'")]
    UnsupportedType(String),

    /// A `$ref` pointing at a component that does not exist.
    #[from(ignore)]
    #[display("unresolved schema reference '{_0}'")]
    UnresolvedReference(String),

    /// A `$ref` chain that loops back on itself.
    #[from(ignore)]
    #[display("cyclic schema reference '{_0}'")]
    CyclicReference(String),

    /// Attribute nesting exceeded the builder's depth limit.
    #[from(ignore)]
    #[display("schema nesting exceeds {_0} levels")]
    NestingTooDeep(usize),

    /// Wraps a failure with the property or parameter that produced it.
    #[from(ignore)]
    #[display("failed to build attribute '{name}': {source}")]
    AttributeBuild {
        /// Property or parameter name.
        name: String,
        /// Underlying failure.
        source: Box<MapperError>,
    },

    /// The OpenAPI document could not be parsed.
    #[from(ignore)]
    #[display("invalid OpenAPI document: {_0}")]
    Document(String),

    /// Generator configuration could not be parsed or validated.
    #[display("config error: {_0}")]
    Config(String),

    /// A configured operation could not be located in the document.
    #[from(ignore)]
    #[display("explorer error: {_0}")]
    Explorer(String),
}

impl MapperError {
    /// Wraps `self` with the name of the attribute being built.
    pub fn in_attribute(self, name: impl Into<String>) -> Self {
        MapperError::AttributeBuild {
            name: name.into(),
            source: Box::new(self),
        }
    }
}

impl std::error::Error for MapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapperError::AttributeBuild { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Helper type alias for Result using MapperError.
pub type MapperResult<T> = Result<T, MapperError>;
