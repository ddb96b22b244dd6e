#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use tfcodegen_core::MapperError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Document or config could not be loaded.
    #[display("{}", _0)]
    Mapper(MapperError),

    /// The IR could not be serialized.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` has no source, so `derive(Error)` does not fit.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Mapper(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::General(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
