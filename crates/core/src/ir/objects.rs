//! Object models and their fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::TypeRef;

/// Declared default of a field.
///
/// A JSON `null` default is indistinguishable from no default and maps to
/// [`FieldDefault::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefault {
    /// No default, or `null`.
    #[default]
    Absent,
    /// Any other JSON value, falsy ones included.
    Value(Value),
}

impl FieldDefault {
    /// Whether no default was declared.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldDefault::Absent)
    }

    /// The declared value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldDefault::Absent => None,
            FieldDefault::Value(value) => Some(value),
        }
    }
}

impl From<Option<&Value>> for FieldDefault {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldDefault::Absent,
            Some(value) => FieldDefault::Value(value.clone()),
        }
    }
}

/// A single property of a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Property name as written
    pub name: String,
    /// Property type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Listed in the schema's `required`
    pub required: bool,
    /// Property `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Property `default`
    #[serde(default, skip_serializing_if = "FieldDefault::is_absent")]
    pub default: FieldDefault,
}

/// A named object type from `components.schemas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Component name
    pub name: String,
    /// Properties in declaration order
    pub fields: Vec<Field>,
    /// Schema `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Model {
    /// Field by property name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
