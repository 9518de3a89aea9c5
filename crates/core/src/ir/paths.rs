//! Endpoints, webhooks and the operations they carry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::TypeRef;

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated path segment
    Path,
    /// Query string entry
    Query,
    /// Request header
    Header,
    /// Cookie value
    Cookie,
    /// Entire query string as one value (3.2)
    Querystring,
}

impl ParameterLocation {
    /// Parse an `in` value; `None` for unknown locations.
    pub fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            "querystring" => Some(ParameterLocation::Querystring),
            _ => None,
        }
    }

    /// The `in` value as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Querystring => "querystring",
        }
    }
}

/// An operation input, unique per `(name, location)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Where the value is sent
    pub location: ParameterLocation,
    /// From `schema`, or the primary media type of `content`
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Always true for path parameters
    pub required: bool,
    /// Parameter `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter `deprecated`
    #[serde(default)]
    pub deprecated: bool,
}

/// Payload sent with an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Primary media type of the body
    pub content_type: String,
    /// Payload type under the primary media type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Body `required`
    pub required: bool,
    /// Body `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One possible answer of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `"200"`, `"2XX"` or `"default"`
    pub status_code: String,
    /// Response `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media type to payload type, in declaration order
    #[serde(default)]
    pub content: IndexMap<String, TypeRef>,
}

/// One HTTP method on an endpoint or webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Lower-case HTTP method
    pub method: String,
    /// URL template, or the webhook name
    pub path: String,
    /// Declared or synthesized identifier
    pub operation_id: String,
    /// Operation `summary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operation `tags`
    #[serde(default)]
    pub tags: Vec<String>,
    /// Path-level parameters merged with the operation's own
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses in declaration order
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Operation `deprecated`
    #[serde(default)]
    pub deprecated: bool,
}

impl Operation {
    /// Parameter by name and location.
    pub fn parameter(&self, name: &str, location: ParameterLocation) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.location == location)
    }

    /// Response by status code.
    pub fn response(&self, status_code: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.status_code == status_code)
    }
}

/// All operations under one URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// URL template such as `/pets/{id}`
    pub path: String,
    /// Fixed method slots first, then custom methods
    pub operations: Vec<Operation>,
    /// Path item `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations the API provider initiates towards the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Key under `webhooks`
    pub name: String,
    /// Fixed method slots first, then custom methods
    pub operations: Vec<Operation>,
    /// Path item `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_location_round_trip() {
        for raw in ["path", "query", "header", "cookie", "querystring"] {
            let location = ParameterLocation::parse(raw).unwrap();
            assert_eq!(location.as_str(), raw);
            assert_eq!(serde_json::to_value(location).unwrap(), raw);
        }
        assert_eq!(ParameterLocation::parse("body"), None);
    }
}
