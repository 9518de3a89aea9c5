//! Version-independent intermediate representation.
//!
//! ## Module Structure
//!
//! - `types`: type references (`TypeRef`, `TypeKind`)
//! - `objects`, `enums`, `paths`: the entity kinds
//! - `graph`: the `ApiSchema` root with its registries and validation
//! - `node`: owned and borrowed handles over any entity
//! - `visitor`: mutable tree traversal
//! - `convert`: OpenAPI document to IR
//! - `utils`: naming helpers used by the converter

mod convert;
mod enums;
mod graph;
mod node;
mod objects;
mod paths;
mod types;
pub mod utils;
mod visitor;

pub use convert::{from_openapi, from_openapi_30x, from_openapi_31x, from_openapi_32x};
pub use enums::{Enum, EnumLiteral, EnumValue};
pub use graph::ApiSchema;
pub use node::{CustomNode, Node, NodeKind, NodeMut};
pub use objects::{Field, FieldDefault, Model};
pub use paths::{Endpoint, Operation, Parameter, ParameterLocation, RequestBody, Response, Webhook};
pub use types::{TypeKind, TypeRef};
pub use visitor::NodeVisitor;
