//! Enumerations of scalar literals.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A literal enum member value as declared in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    /// `true` or `false`
    Bool(bool),
    /// Integral number
    Integer(i64),
    /// Number with a fractional part or outside `i64`
    Float(f64),
    /// String literal
    String(String),
}

impl EnumLiteral {
    /// Converts a scalar JSON value; `None` for null, arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(EnumLiteral::Bool(*flag)),
            Value::Number(number) => number
                .as_i64()
                .map(EnumLiteral::Integer)
                .or_else(|| number.as_f64().map(EnumLiteral::Float)),
            Value::String(text) => Some(EnumLiteral::String(text.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// One member of an [`Enum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Identifier derived from the literal, unique within the enum
    pub name: String,
    /// The literal as declared
    pub value: EnumLiteral,
}

/// A named enumeration from `components.schemas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Component name
    pub name: String,
    /// Members in declaration order
    pub values: Vec<EnumValue>,
    /// Schema `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_from_json() {
        assert_eq!(EnumLiteral::from_json(&json!("a")), Some(EnumLiteral::String("a".into())));
        assert_eq!(EnumLiteral::from_json(&json!(3)), Some(EnumLiteral::Integer(3)));
        assert_eq!(EnumLiteral::from_json(&json!(1.5)), Some(EnumLiteral::Float(1.5)));
        assert_eq!(EnumLiteral::from_json(&json!(true)), Some(EnumLiteral::Bool(true)));
        assert_eq!(EnumLiteral::from_json(&json!(null)), None);
        assert_eq!(EnumLiteral::from_json(&json!([1])), None);
    }

    #[test]
    fn test_literal_keeps_json_shape() {
        let values = vec![
            EnumLiteral::String("x".into()),
            EnumLiteral::Integer(7),
            EnumLiteral::Float(0.5),
            EnumLiteral::Bool(false),
        ];
        let encoded = serde_json::to_value(&values).unwrap();
        assert_eq!(encoded, json!(["x", 7, 0.5, false]));
        let decoded: Vec<EnumLiteral> = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, values);
    }
}
