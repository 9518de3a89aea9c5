//! Typed OpenAPI 3.x documents and version dispatch.
//!
//! Raw input is decoded into one of three dialect structures ([`v3_0`],
//! [`v3_1`], [`v3_2`]) selected by the `openapi` version string. The
//! converter in [`crate::ir`] reads them through the [`Dialect`] traits.

pub mod common;
pub mod dialect;
pub mod parser;
pub mod v3_0;
pub mod v3_1;
pub mod v3_2;

pub use dialect::{Dialect, SpecVersion};
pub use parser::{
    OpenApiDocument, OpenApiObject, decode_openapi_document, parse_openapi_version,
    resolve_openapi_model,
};

/// Raised when a raw document cannot be decoded into a typed model.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input text or bytes are not JSON.
    #[error("Failed to decode OpenAPI JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// Root value is not a JSON object.
    #[error("OpenAPI document root must be an object")]
    NotAnObject,
    /// `openapi` is absent or not a string.
    #[error("/openapi: Missing or invalid OpenAPI version string")]
    MissingVersion,
    /// `openapi` is not `major.minor.patch`.
    #[error("/openapi: Invalid OpenAPI version format")]
    InvalidVersion,
    /// Major version other than 3.
    #[error("/openapi: Unsupported OpenAPI major version: {0}")]
    UnsupportedMajor(u64),
    /// The document does not match the dialect's structure.
    #[error("{path}: {source}")]
    Invalid {
        /// JSON pointer to the offending element.
        path: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    /// JSON pointer to the offending element, when one is known.
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::MissingVersion
            | ParseError::InvalidVersion
            | ParseError::UnsupportedMajor(_) => Some("/openapi"),
            ParseError::Invalid { path, .. } => Some(path),
            ParseError::Json(_) | ParseError::NotAnObject => None,
        }
    }

    /// The message without its location prefix.
    pub fn detail(&self) -> String {
        match self {
            ParseError::MissingVersion => "Missing or invalid OpenAPI version string".into(),
            ParseError::InvalidVersion => "Invalid OpenAPI version format".into(),
            ParseError::UnsupportedMajor(major) => {
                format!("Unsupported OpenAPI major version: {major}")
            }
            ParseError::Invalid { source, .. } => source.to_string(),
            ParseError::Json(_) | ParseError::NotAnObject => self.to_string(),
        }
    }
}
