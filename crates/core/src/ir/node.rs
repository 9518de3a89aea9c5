//! Uniform handles over every IR entity.
//!
//! [`Node`] owns one entity of any kind and is what enrichment code hands to
//! [`ApiSchema::add_node`]. [`NodeMut`] borrows one mutably and exposes its
//! child nodes, which is all the visitor needs to walk the tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{Enum, EnumValue};
use super::graph::ApiSchema;
use super::objects::{Field, Model};
use super::paths::{Endpoint, Operation, Parameter, RequestBody, Response, Webhook};
use super::types::TypeRef;

/// Free-form node for backend- or pipeline-specific content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNode {
    /// Backend-defined discriminator, e.g. `"route_group"`
    pub kind: String,
    /// Identifying name within `kind`
    pub name: String,
    /// Arbitrary payload
    #[serde(default)]
    pub data: Value,
}

impl CustomNode {
    /// Node with the given discriminator, name and payload.
    pub fn new(kind: impl Into<String>, name: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            data,
        }
    }
}

/// Discriminator shared by [`Node`] and [`NodeMut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`ApiSchema`] root
    Schema,
    /// [`Model`]
    Model,
    /// [`Field`]
    Field,
    /// [`Enum`]
    Enum,
    /// [`EnumValue`]
    EnumValue,
    /// [`Endpoint`]
    Endpoint,
    /// [`Webhook`]
    Webhook,
    /// [`Operation`]
    Operation,
    /// [`Parameter`]
    Parameter,
    /// [`RequestBody`]
    RequestBody,
    /// [`Response`]
    Response,
    /// [`TypeRef`]
    Type,
    /// [`CustomNode`]
    Custom,
}

/// An owned IR entity of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// [`Model`]
    Model(Model),
    /// [`Field`]
    Field(Field),
    /// [`Enum`]
    Enum(Enum),
    /// [`EnumValue`]
    EnumValue(EnumValue),
    /// [`Endpoint`]
    Endpoint(Endpoint),
    /// [`Webhook`]
    Webhook(Webhook),
    /// [`Operation`]
    Operation(Operation),
    /// [`Parameter`]
    Parameter(Parameter),
    /// [`RequestBody`]
    RequestBody(RequestBody),
    /// [`Response`]
    Response(Response),
    /// [`TypeRef`]
    Type(TypeRef),
    /// [`CustomNode`]
    Custom(CustomNode),
}

impl Node {
    /// Kind of the owned entity.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Model(_) => NodeKind::Model,
            Node::Field(_) => NodeKind::Field,
            Node::Enum(_) => NodeKind::Enum,
            Node::EnumValue(_) => NodeKind::EnumValue,
            Node::Endpoint(_) => NodeKind::Endpoint,
            Node::Webhook(_) => NodeKind::Webhook,
            Node::Operation(_) => NodeKind::Operation,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::RequestBody(_) => NodeKind::RequestBody,
            Node::Response(_) => NodeKind::Response,
            Node::Type(_) => NodeKind::Type,
            Node::Custom(_) => NodeKind::Custom,
        }
    }

    /// Identifying name, for kinds that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Model(model) => Some(&model.name),
            Node::Field(field) => Some(&field.name),
            Node::Enum(item) => Some(&item.name),
            Node::EnumValue(value) => Some(&value.name),
            Node::Endpoint(endpoint) => Some(&endpoint.path),
            Node::Webhook(webhook) => Some(&webhook.name),
            Node::Operation(operation) => Some(&operation.operation_id),
            Node::Parameter(parameter) => Some(&parameter.name),
            Node::Response(response) => Some(&response.status_code),
            Node::Custom(custom) => Some(&custom.name),
            Node::RequestBody(_) | Node::Type(_) => None,
        }
    }

    /// Borrow the owned entity as a [`NodeMut`].
    pub fn as_node_mut(&mut self) -> NodeMut<'_> {
        match self {
            Node::Model(node) => NodeMut::Model(node),
            Node::Field(node) => NodeMut::Field(node),
            Node::Enum(node) => NodeMut::Enum(node),
            Node::EnumValue(node) => NodeMut::EnumValue(node),
            Node::Endpoint(node) => NodeMut::Endpoint(node),
            Node::Webhook(node) => NodeMut::Webhook(node),
            Node::Operation(node) => NodeMut::Operation(node),
            Node::Parameter(node) => NodeMut::Parameter(node),
            Node::RequestBody(node) => NodeMut::RequestBody(node),
            Node::Response(node) => NodeMut::Response(node),
            Node::Type(node) => NodeMut::Type(node),
            Node::Custom(node) => NodeMut::Custom(node),
        }
    }
}

macro_rules! impl_from_for_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }

            impl<'a> From<&'a mut $ty> for NodeMut<'a> {
                fn from(node: &'a mut $ty) -> Self {
                    NodeMut::$variant(node)
                }
            }
        )*
    };
}

impl_from_for_node!(
    Model(Model),
    Field(Field),
    Enum(Enum),
    EnumValue(EnumValue),
    Endpoint(Endpoint),
    Webhook(Webhook),
    Operation(Operation),
    Parameter(Parameter),
    RequestBody(RequestBody),
    Response(Response),
    Type(TypeRef),
    Custom(CustomNode),
);

/// A mutable borrow of one IR entity.
#[derive(Debug)]
pub enum NodeMut<'a> {
    /// [`ApiSchema`] root
    Schema(&'a mut ApiSchema),
    /// [`Model`]
    Model(&'a mut Model),
    /// [`Field`]
    Field(&'a mut Field),
    /// [`Enum`]
    Enum(&'a mut Enum),
    /// [`EnumValue`]
    EnumValue(&'a mut EnumValue),
    /// [`Endpoint`]
    Endpoint(&'a mut Endpoint),
    /// [`Webhook`]
    Webhook(&'a mut Webhook),
    /// [`Operation`]
    Operation(&'a mut Operation),
    /// [`Parameter`]
    Parameter(&'a mut Parameter),
    /// [`RequestBody`]
    RequestBody(&'a mut RequestBody),
    /// [`Response`]
    Response(&'a mut Response),
    /// [`TypeRef`]
    Type(&'a mut TypeRef),
    /// [`CustomNode`]
    Custom(&'a mut CustomNode),
}

impl<'a> From<&'a mut ApiSchema> for NodeMut<'a> {
    fn from(schema: &'a mut ApiSchema) -> Self {
        NodeMut::Schema(schema)
    }
}

impl<'a> NodeMut<'a> {
    /// Kind of the borrowed entity.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeMut::Schema(_) => NodeKind::Schema,
            NodeMut::Model(_) => NodeKind::Model,
            NodeMut::Field(_) => NodeKind::Field,
            NodeMut::Enum(_) => NodeKind::Enum,
            NodeMut::EnumValue(_) => NodeKind::EnumValue,
            NodeMut::Endpoint(_) => NodeKind::Endpoint,
            NodeMut::Webhook(_) => NodeKind::Webhook,
            NodeMut::Operation(_) => NodeKind::Operation,
            NodeMut::Parameter(_) => NodeKind::Parameter,
            NodeMut::RequestBody(_) => NodeKind::RequestBody,
            NodeMut::Response(_) => NodeKind::Response,
            NodeMut::Type(_) => NodeKind::Type,
            NodeMut::Custom(_) => NodeKind::Custom,
        }
    }

    /// Direct child nodes in field order. Scalars and JSON payloads are
    /// not nodes and are never returned.
    pub fn children(self) -> Vec<NodeMut<'a>> {
        match self {
            NodeMut::Schema(schema) => {
                let mut children = Vec::new();
                children.extend(schema.models.iter_mut().map(NodeMut::Model));
                children.extend(schema.enums.iter_mut().map(NodeMut::Enum));
                children.extend(schema.endpoints.iter_mut().map(NodeMut::Endpoint));
                children.extend(schema.webhooks.iter_mut().map(NodeMut::Webhook));
                children.extend(schema.custom_nodes.iter_mut().map(Node::as_node_mut));
                children
            }
            NodeMut::Model(model) => model.fields.iter_mut().map(NodeMut::Field).collect(),
            NodeMut::Field(field) => vec![NodeMut::Type(&mut field.ty)],
            NodeMut::Enum(item) => item.values.iter_mut().map(NodeMut::EnumValue).collect(),
            NodeMut::Endpoint(endpoint) => endpoint
                .operations
                .iter_mut()
                .map(NodeMut::Operation)
                .collect(),
            NodeMut::Webhook(webhook) => webhook
                .operations
                .iter_mut()
                .map(NodeMut::Operation)
                .collect(),
            NodeMut::Operation(operation) => {
                let mut children: Vec<NodeMut<'a>> = operation
                    .parameters
                    .iter_mut()
                    .map(NodeMut::Parameter)
                    .collect();
                if let Some(body) = operation.request_body.as_mut() {
                    children.push(NodeMut::RequestBody(body));
                }
                children.extend(operation.responses.iter_mut().map(NodeMut::Response));
                children
            }
            NodeMut::Parameter(parameter) => vec![NodeMut::Type(&mut parameter.ty)],
            NodeMut::RequestBody(body) => vec![NodeMut::Type(&mut body.ty)],
            NodeMut::Response(response) => {
                response.content.values_mut().map(NodeMut::Type).collect()
            }
            NodeMut::Type(ty) => ty.children_mut().into_iter().map(NodeMut::Type).collect(),
            NodeMut::EnumValue(_) | NodeMut::Custom(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::objects::FieldDefault;
    use serde_json::json;

    fn pet_model() -> Model {
        Model {
            name: "Pet".into(),
            fields: vec![
                Field {
                    name: "tags".into(),
                    ty: TypeRef::array(TypeRef::string(None)),
                    required: false,
                    description: None,
                    default: FieldDefault::Absent,
                },
                Field {
                    name: "id".into(),
                    ty: TypeRef::integer(None),
                    required: true,
                    description: None,
                    default: FieldDefault::Absent,
                },
            ],
            description: None,
        }
    }

    #[test]
    fn test_model_children_are_fields() {
        let mut model = pet_model();
        let kinds: Vec<_> = NodeMut::Model(&mut model)
            .children()
            .iter()
            .map(NodeMut::kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::Field, NodeKind::Field]);
    }

    #[test]
    fn test_type_children_follow_nesting() {
        let mut ty = TypeRef::map(TypeRef::array(TypeRef::boolean()));
        let children = NodeMut::Type(&mut ty).children();
        assert_eq!(children.len(), 1);
        let grandchildren = children.into_iter().next().unwrap().children();
        assert_eq!(grandchildren.len(), 1);
    }

    #[test]
    fn test_custom_node_has_no_children() {
        let mut node = Node::Custom(CustomNode::new("marker", "m", json!({"a": [1, 2]})));
        assert_eq!(node.kind(), NodeKind::Custom);
        assert!(node.as_node_mut().children().is_empty());
    }

    #[test]
    fn test_node_serialization_is_tagged() {
        let node = Node::from(CustomNode::new("route_group", "pets", json!(null)));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["node"], "custom");
        assert_eq!(value["kind"], "route_group");
        let back: Node = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }
}
