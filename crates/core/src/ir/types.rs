//! Type references carried by fields, parameters, bodies and responses.

use serde::{Deserialize, Serialize};

/// Shape of a value together with its nullability.
///
/// Serialized flat: `{"nullable": false, "kind": "array", "item": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Whether `null` is accepted as well.
    #[serde(default)]
    pub nullable: bool,
    /// The shape itself.
    #[serde(flatten)]
    pub kind: TypeKind,
}

/// Shapes a [`TypeRef`] can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// `string`, optionally with a format such as `date-time`
    String {
        /// Schema `format`
        format: Option<String>,
    },
    /// `integer`, optionally `int32`/`int64`
    Integer {
        /// Schema `format`
        format: Option<String>,
    },
    /// `number`, optionally `float`/`double`
    Number {
        /// Schema `format`
        format: Option<String>,
    },
    /// `boolean`
    Boolean,
    /// Homogeneous list
    Array {
        /// Element type
        item: Box<TypeRef>,
    },
    /// String-keyed dictionary
    Map {
        /// Value type
        value: Box<TypeRef>,
    },
    /// One of several shapes (oneOf/anyOf/allOf flattened)
    Union {
        /// Alternatives in declaration order
        variants: Vec<TypeRef>,
    },
    /// Reference to a model by name
    ModelRef {
        /// Model name
        name: String,
    },
    /// Reference to an enum by name
    EnumRef {
        /// Enum name
        name: String,
    },
    /// Unconstrained value
    Any,
}

impl TypeRef {
    /// Non-nullable reference of the given shape.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            nullable: false,
            kind,
        }
    }

    /// Unconstrained value.
    pub fn any() -> Self {
        Self::new(TypeKind::Any)
    }

    /// `string` with an optional format.
    pub fn string(format: Option<String>) -> Self {
        Self::new(TypeKind::String { format })
    }

    /// `integer` with an optional format.
    pub fn integer(format: Option<String>) -> Self {
        Self::new(TypeKind::Integer { format })
    }

    /// `number` with an optional format.
    pub fn number(format: Option<String>) -> Self {
        Self::new(TypeKind::Number { format })
    }

    /// `boolean`
    pub fn boolean() -> Self {
        Self::new(TypeKind::Boolean)
    }

    /// List of `item`.
    pub fn array(item: TypeRef) -> Self {
        Self::new(TypeKind::Array {
            item: Box::new(item),
        })
    }

    /// Dictionary of `value`.
    pub fn map(value: TypeRef) -> Self {
        Self::new(TypeKind::Map {
            value: Box::new(value),
        })
    }

    /// One of `variants`.
    pub fn union(variants: Vec<TypeRef>) -> Self {
        Self::new(TypeKind::Union { variants })
    }

    /// Reference to the named model.
    pub fn model_ref(name: impl Into<String>) -> Self {
        Self::new(TypeKind::ModelRef { name: name.into() })
    }

    /// Reference to the named enum.
    pub fn enum_ref(name: impl Into<String>) -> Self {
        Self::new(TypeKind::EnumRef { name: name.into() })
    }

    /// Same shape, with nullability replaced.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether this is [`TypeKind::Any`].
    pub fn is_any(&self) -> bool {
        matches!(self.kind, TypeKind::Any)
    }

    /// Nested type references, in declaration order.
    pub fn children_mut(&mut self) -> Vec<&mut TypeRef> {
        match &mut self.kind {
            TypeKind::Array { item } => vec![item.as_mut()],
            TypeKind::Map { value } => vec![value.as_mut()],
            TypeKind::Union { variants } => variants.iter_mut().collect(),
            _ => Vec::new(),
        }
    }

    /// Every model or enum name this type refers to, depth first.
    pub fn referenced_names(&self) -> Vec<(&str, bool)> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<(&'a str, bool)>) {
        match &self.kind {
            TypeKind::ModelRef { name } => out.push((name, true)),
            TypeKind::EnumRef { name } => out.push((name, false)),
            TypeKind::Array { item } => item.collect_names(out),
            TypeKind::Map { value } => value.collect_names(out),
            TypeKind::Union { variants } => {
                for variant in variants {
                    variant.collect_names(out);
                }
            }
            _ => {}
        }
    }
}
