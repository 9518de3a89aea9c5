//! Version detection and decoding of raw OpenAPI documents.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;
use tracing::debug;

use super::dialect::SpecVersion;
use super::{ParseError, v3_0, v3_1, v3_2};

#[allow(clippy::expect_used)]
static OPENAPI_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+)(?:[-+][0-9A-Za-z.-]+)?\s*$")
        .expect("version pattern is valid")
});

/// A decoded document in one of the three supported dialects.
#[derive(Debug, Clone)]
pub enum OpenApiObject {
    /// 3.0.x
    V30(Box<v3_0::OpenApi>),
    /// 3.1.x
    V31(Box<v3_1::OpenApi>),
    /// 3.2.x and newer 3.x
    V32(Box<v3_2::OpenApi>),
}

impl OpenApiObject {
    /// Dialect the document was decoded with.
    pub fn version(&self) -> SpecVersion {
        match self {
            OpenApiObject::V30(_) => SpecVersion::V3_0,
            OpenApiObject::V31(_) => SpecVersion::V3_1,
            OpenApiObject::V32(_) => SpecVersion::V3_2,
        }
    }

    /// The `openapi` string exactly as declared.
    pub fn openapi(&self) -> &str {
        match self {
            OpenApiObject::V30(doc) => &doc.openapi,
            OpenApiObject::V31(doc) => &doc.openapi,
            OpenApiObject::V32(doc) => &doc.openapi,
        }
    }
}

/// Any input accepted by [`decode_openapi_document`].
#[derive(Debug, Clone)]
pub enum OpenApiDocument<'a> {
    /// Already decoded, returned unchanged.
    Decoded(OpenApiObject),
    /// JSON text.
    Text(&'a str),
    /// UTF-8 JSON bytes.
    Bytes(&'a [u8]),
    /// A parsed JSON value, e.g. converted from YAML.
    Value(Value),
}

impl From<OpenApiObject> for OpenApiDocument<'_> {
    fn from(object: OpenApiObject) -> Self {
        OpenApiDocument::Decoded(object)
    }
}

impl<'a> From<&'a str> for OpenApiDocument<'a> {
    fn from(text: &'a str) -> Self {
        OpenApiDocument::Text(text)
    }
}

impl<'a> From<&'a String> for OpenApiDocument<'a> {
    fn from(text: &'a String) -> Self {
        OpenApiDocument::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for OpenApiDocument<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        OpenApiDocument::Bytes(bytes)
    }
}

impl From<Value> for OpenApiDocument<'_> {
    fn from(value: Value) -> Self {
        OpenApiDocument::Value(value)
    }
}

/// Parse an `openapi` version string into `(major, minor, patch)`.
pub fn parse_openapi_version(version: &str) -> Result<(u64, u64, u64), ParseError> {
    let captures = OPENAPI_VERSION_RE
        .captures(version)
        .ok_or(ParseError::InvalidVersion)?;
    let component = |index: usize| -> Result<u64, ParseError> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or(ParseError::InvalidVersion)
    };
    Ok((component(1)?, component(2)?, component(3)?))
}

/// Select the document model for a version string.
///
/// Minor `0` maps to 3.0, `1` to 3.1 and anything newer to 3.2.
pub fn resolve_openapi_model(version: &str) -> Result<SpecVersion, ParseError> {
    let (major, minor, _) = parse_openapi_version(version)?;
    if major != 3 {
        return Err(ParseError::UnsupportedMajor(major));
    }
    Ok(match minor {
        0 => SpecVersion::V3_0,
        1 => SpecVersion::V3_1,
        _ => SpecVersion::V3_2,
    })
}

/// Decode raw input into a typed document of the matching dialect.
pub fn decode_openapi_document<'a>(
    document: impl Into<OpenApiDocument<'a>>,
) -> Result<OpenApiObject, ParseError> {
    let source = match document.into() {
        OpenApiDocument::Decoded(object) => return Ok(object),
        OpenApiDocument::Text(text) => decode_json(text.as_bytes())?,
        OpenApiDocument::Bytes(bytes) => decode_json(bytes)?,
        OpenApiDocument::Value(value) => value,
    };
    if !source.is_object() {
        return Err(ParseError::NotAnObject);
    }

    let version = source
        .get("openapi")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingVersion)?;
    let model = resolve_openapi_model(version)?;
    debug!(openapi = %version, dialect = %model, "Decoding OpenAPI document");

    Ok(match model {
        SpecVersion::V3_0 => OpenApiObject::V30(Box::new(decode_with_path(source)?)),
        SpecVersion::V3_1 => OpenApiObject::V31(Box::new(decode_with_path(source)?)),
        SpecVersion::V3_2 => OpenApiObject::V32(Box::new(decode_with_path(source)?)),
    })
}

fn decode_json(bytes: &[u8]) -> Result<Value, ParseError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ParseError::Json)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ParseError::NotAnObject)
    }
}

fn decode_with_path<T: DeserializeOwned>(source: Value) -> Result<T, ParseError> {
    serde_path_to_error::deserialize(source).map_err(|err| {
        let path = json_pointer(err.path());
        ParseError::Invalid {
            path,
            source: err.into_inner(),
        }
    })
}

/// Render a deserialization path as a JSON pointer (`/` for the root).
fn json_pointer(path: &serde_path_to_error::Path) -> String {
    let mut pointer = String::new();
    for segment in path.iter() {
        let token = match segment {
            Segment::Seq { index } => index.to_string(),
            Segment::Map { key } => key.replace('~', "~0").replace('/', "~1"),
            Segment::Enum { variant } => variant.clone(),
            Segment::Unknown => continue,
        };
        pointer.push('/');
        pointer.push_str(&token);
    }
    if pointer.is_empty() {
        pointer.push('/');
    }
    pointer
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const MINIMAL_30: &str = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Minimal", "version": "1.0.0"},
        "paths": {}
    }"#;

    #[test]
    fn test_parse_version_with_suffix() {
        assert_eq!(parse_openapi_version("3.1.0").unwrap(), (3, 1, 0));
        assert_eq!(parse_openapi_version(" 3.2.1-rc.1 ").unwrap(), (3, 2, 1));
        assert_eq!(parse_openapi_version("3.0.0+build.7").unwrap(), (3, 0, 0));
    }

    #[test]
    fn test_parse_version_rejects_short_form() {
        let err = parse_openapi_version("3.1").unwrap_err();
        assert_eq!(err.to_string(), "/openapi: Invalid OpenAPI version format");
    }

    #[test]
    fn test_resolve_model_by_minor() {
        assert_eq!(resolve_openapi_model("3.0.2").unwrap(), SpecVersion::V3_0);
        assert_eq!(resolve_openapi_model("3.1.1").unwrap(), SpecVersion::V3_1);
        assert_eq!(resolve_openapi_model("3.2.0").unwrap(), SpecVersion::V3_2);
        assert_eq!(resolve_openapi_model("3.7.0").unwrap(), SpecVersion::V3_2);
    }

    #[test]
    fn test_resolve_model_rejects_other_majors() {
        let err = resolve_openapi_model("2.0.0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "/openapi: Unsupported OpenAPI major version: 2"
        );
        assert_eq!(err.path(), Some("/openapi"));
    }

    #[test]
    fn test_decode_text() {
        let object = decode_openapi_document(MINIMAL_30).unwrap();
        assert_eq!(object.version(), SpecVersion::V3_0);
        assert_eq!(object.openapi(), "3.0.3");
    }

    #[test]
    fn test_decode_bytes_and_value() {
        let object = decode_openapi_document(MINIMAL_30.as_bytes()).unwrap();
        assert!(matches!(object, OpenApiObject::V30(_)));

        let value = serde_json::json!({
            "openapi": "3.1.0",
            "info": {"title": "t", "version": "1"}
        });
        let object = decode_openapi_document(value).unwrap();
        assert!(matches!(object, OpenApiObject::V31(_)));
    }

    #[test]
    fn test_decoded_passes_through() {
        let object = decode_openapi_document(MINIMAL_30).unwrap();
        let again = decode_openapi_document(object).unwrap();
        assert_eq!(again.openapi(), "3.0.3");
    }

    #[test]
    fn test_malformed_json() {
        let err = decode_openapi_document("{not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
        assert!(err.to_string().starts_with("Failed to decode OpenAPI JSON"));
    }

    #[test]
    fn test_non_object_root() {
        let err = decode_openapi_document("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));

        let err = decode_openapi_document(serde_json::json!("3.0.0")).unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn test_missing_version() {
        let err = decode_openapi_document(r#"{"openapi": 3}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingVersion));
        assert_eq!(
            err.to_string(),
            "/openapi: Missing or invalid OpenAPI version string"
        );
    }

    #[test]
    fn test_structure_mismatch_reports_pointer() {
        let err = decode_openapi_document(
            r#"{
                "openapi": "3.0.0",
                "info": {"title": "t", "version": "1"},
                "paths": {"/pets": {"get": {"tags": "not-a-list"}}}
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
        assert_eq!(err.path(), Some("/paths/~1pets/get/tags"));
    }

    #[test]
    fn test_error_inside_nested_schema_keeps_location() {
        let err = decode_openapi_document(
            r#"{
                "openapi": "3.1.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {"M": {
                    "type": "object",
                    "properties": {"a": {"type": "string", "maxLength": "ten"}}
                }}}
            }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.path(),
            Some("/components/schemas/M/properties/a/maxLength")
        );
        assert!(err.detail().starts_with("invalid type: string \"ten\""));
    }

    #[test]
    fn test_error_inside_array_items_keeps_location() {
        let err = decode_openapi_document(
            r#"{
                "openapi": "3.0.3",
                "info": {"title": "t", "version": "1"},
                "paths": {},
                "components": {"schemas": {"M": {
                    "type": "array",
                    "items": {"required": true}
                }}}
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("/components/schemas/M/items/required"));
        assert!(err.detail().starts_with("invalid type: boolean `true`"));
    }

    #[test]
    fn test_boolean_schema_still_accepted() {
        let object = decode_openapi_document(
            r#"{
                "openapi": "3.1.0",
                "info": {"title": "t", "version": "1"},
                "components": {"schemas": {"Anything": true, "M": {
                    "properties": {"a": false}
                }}}
            }"#,
        )
        .unwrap();
        assert_eq!(object.version(), SpecVersion::V3_1);
    }
}
