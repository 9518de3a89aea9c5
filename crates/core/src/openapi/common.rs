//! Objects shared by every OpenAPI 3.x dialect.
//!
//! Metadata objects (info, servers, tags, ...) are modelled once as the union
//! of the fields the three dialects define. Schema-bearing objects differ
//! between versions and live in the per-dialect modules instead.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Metadata about the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// Version of the API itself, not of the OpenAPI format.
    pub version: String,
    /// Short summary (3.1+).
    pub summary: Option<String>,
    /// Longer CommonMark description.
    pub description: Option<String>,
    /// URL of the terms of service.
    pub terms_of_service: Option<String>,
    /// Contact details.
    pub contact: Option<Contact>,
    /// License details.
    pub license: Option<License>,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    /// Person or organisation name.
    pub name: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

/// License information for the exposed API.
#[derive(Debug, Clone, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// SPDX identifier (3.1+), mutually exclusive with `url`.
    pub identifier: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// A server hosting the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Server URL, possibly templated with `{variables}`.
    pub url: String,
    /// Human readable description.
    pub description: Option<String>,
    /// Unique server name (3.2).
    pub name: Option<String>,
    /// Substitutions for the URL template.
    pub variables: Option<indexmap::IndexMap<String, ServerVariable>>,
}

/// A variable for server URL template substitution.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerVariable {
    /// Value used when none is supplied.
    pub default: String,
    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Human readable description.
    pub description: Option<String>,
}

/// Link to external documentation.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalDocumentation {
    /// Target URL.
    pub url: String,
    /// Human readable description.
    pub description: Option<String>,
}

/// Metadata for a single tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name as referenced by operations.
    pub name: String,
    /// Short summary (3.2).
    pub summary: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
    /// Name of the enclosing tag (3.2).
    pub parent: Option<String>,
    /// Free-form tag category (3.2).
    pub kind: Option<String>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocumentation>,
}

/// Discriminator for polymorphic schemas (oneOf/anyOf).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// The property name that contains the discriminator value.
    pub property_name: String,
    /// Optional mapping from discriminator values to schema refs.
    pub mapping: Option<indexmap::IndexMap<String, String>>,
    /// Fallback schema when no mapping matches (3.2).
    pub default_mapping: Option<String>,
}

/// XML serialization hints.
#[derive(Debug, Clone, Deserialize)]
pub struct Xml {
    /// Element or attribute name.
    pub name: Option<String>,
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Namespace prefix.
    pub prefix: Option<String>,
    /// Serialize as an attribute instead of an element.
    #[serde(default)]
    pub attribute: bool,
    /// Wrap array items in an outer element.
    #[serde(default)]
    pub wrapped: bool,
}

/// A schema position that also accepts the JSON Schema boolean forms
/// (`true` = anything, `false` = nothing).
///
/// Errors inside a schema object surface with their own message and path.
#[derive(Debug, Clone)]
pub enum SchemaOrBool<S> {
    /// `true` or `false`.
    Bool(bool),
    /// A schema object.
    Schema(Box<S>),
}

impl<S> SchemaOrBool<S> {
    /// The object form, if this is not a boolean schema.
    pub fn as_schema(&self) -> Option<&S> {
        match self {
            SchemaOrBool::Bool(_) => None,
            SchemaOrBool::Schema(schema) => Some(schema),
        }
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for SchemaOrBool<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SchemaOrBoolVisitor(PhantomData))
    }
}

struct SchemaOrBoolVisitor<S>(PhantomData<fn() -> S>);

impl<'de, S: Deserialize<'de>> Visitor<'de> for SchemaOrBoolVisitor<S> {
    type Value = SchemaOrBool<S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a schema object or a boolean")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(SchemaOrBool::Bool(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        S::deserialize(MapAccessDeserializer::new(map))
            .map(|schema| SchemaOrBool::Schema(Box::new(schema)))
    }
}

/// Schema `type` as written in 3.1+: a single name or a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// The effective primitive type of a schema after nullability is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeDecl<'a> {
    /// First non-null type name, if any.
    pub name: Option<&'a str>,
    /// Whether `null` is accepted as well.
    pub nullable: bool,
}

impl<'a> TypeDecl<'a> {
    /// 3.0 form: scalar `type` plus a boolean `nullable` flag.
    pub fn legacy(name: Option<&'a str>, nullable: bool) -> Self {
        Self { name, nullable }
    }

    /// 3.1+ form: `type` may be a list containing `"null"`.
    pub fn from_type_set(schema_type: Option<&'a SchemaType>) -> Self {
        match schema_type {
            None => Self::default(),
            Some(SchemaType::Single(name)) => Self {
                name: Some(name.as_str()),
                nullable: false,
            },
            Some(SchemaType::Multiple(names)) => Self {
                name: names
                    .iter()
                    .map(String::as_str)
                    .find(|name| *name != "null"),
                nullable: names.iter().any(|name| name == "null"),
            },
        }
    }

    /// Whether the effective type is `name`.
    pub fn is(&self, name: &str) -> bool {
        self.name == Some(name)
    }
}
