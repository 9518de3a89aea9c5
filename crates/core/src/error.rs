//! Errors raised while building or checking the IR.

use thiserror::Error;

use crate::openapi::ParseError;

/// Failure of a pipeline stage after decoding started.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document could not be turned into the IR.
    #[error("{}", located(.detail, .path))]
    Conversion {
        /// Message without location.
        detail: String,
        /// JSON pointer to the offending element.
        path: Option<String>,
        /// Decode error this was raised from.
        #[source]
        source: Option<ParseError>,
    },
    /// The IR failed a consistency check.
    #[error("{detail}")]
    Validation {
        /// Every problem found, joined with `"; "`.
        detail: String,
    },
}

impl SchemaError {
    /// Conversion failure without an underlying decode error.
    pub fn conversion(detail: impl Into<String>, path: Option<String>) -> Self {
        SchemaError::Conversion {
            detail: detail.into(),
            path,
            source: None,
        }
    }

    /// Consistency check failure.
    pub fn validation(detail: impl Into<String>) -> Self {
        SchemaError::Validation {
            detail: detail.into(),
        }
    }

    /// Location of the failure, when one is known.
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::Conversion { path, .. } => path.as_deref(),
            SchemaError::Validation { .. } => None,
        }
    }
}

impl From<ParseError> for SchemaError {
    fn from(err: ParseError) -> Self {
        SchemaError::Conversion {
            detail: err.detail(),
            path: err.path().map(str::to_string),
            source: Some(err),
        }
    }
}

#[allow(clippy::ref_option)]
fn located(detail: &str, path: &Option<String>) -> String {
    match path {
        Some(path) => format!("{path}: {detail}"),
        None => detail.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_conversion_display_with_path() {
        let err = SchemaError::conversion("bad ref", Some("/components/schemas/Pet".into()));
        assert_eq!(err.to_string(), "/components/schemas/Pet: bad ref");
    }

    #[test]
    fn test_conversion_display_without_path() {
        let err = SchemaError::conversion("bad ref", None);
        assert_eq!(err.to_string(), "bad ref");
    }

    #[test]
    fn test_from_parse_error_keeps_message_and_source() {
        let err = SchemaError::from(ParseError::UnsupportedMajor(2));
        assert_eq!(err.to_string(), "/openapi: Unsupported OpenAPI major version: 2");
        assert_eq!(err.path(), Some("/openapi"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_parse_error_without_location() {
        let err = SchemaError::from(ParseError::NotAnObject);
        assert_eq!(err.to_string(), "OpenAPI document root must be an object");
        assert_eq!(err.path(), None);
    }
}
