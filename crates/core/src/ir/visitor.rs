//! Mutable depth-first traversal over the IR.
//!
//! Override the `visit_*` handler for a kind to act on it. Every default
//! handler calls [`NodeVisitor::generic_visit`]; an override decides between
//! pre-order and post-order by where it calls it, or stops descent by not
//! calling it at all.
//!
//! ```
//! use oasgraph_core::ir::{Model, NodeMut, NodeVisitor};
//!
//! struct PrefixModels;
//!
//! impl NodeVisitor for PrefixModels {
//!     fn visit_model(&mut self, node: &mut Model) {
//!         node.name = format!("Api{}", node.name);
//!         self.generic_visit(NodeMut::Model(node));
//!     }
//! }
//! ```

use super::enums::{Enum, EnumValue};
use super::graph::ApiSchema;
use super::node::{CustomNode, NodeMut};
use super::objects::{Field, Model};
use super::paths::{Endpoint, Operation, Parameter, RequestBody, Response, Webhook};
use super::types::TypeRef;

/// Depth-first visitor over [`NodeMut`] trees.
pub trait NodeVisitor {
    /// Dispatch a node to the handler for its kind.
    fn visit(&mut self, node: NodeMut<'_>) {
        match node {
            NodeMut::Schema(node) => self.visit_schema(node),
            NodeMut::Model(node) => self.visit_model(node),
            NodeMut::Field(node) => self.visit_field(node),
            NodeMut::Enum(node) => self.visit_enum(node),
            NodeMut::EnumValue(node) => self.visit_enum_value(node),
            NodeMut::Endpoint(node) => self.visit_endpoint(node),
            NodeMut::Webhook(node) => self.visit_webhook(node),
            NodeMut::Operation(node) => self.visit_operation(node),
            NodeMut::Parameter(node) => self.visit_parameter(node),
            NodeMut::RequestBody(node) => self.visit_request_body(node),
            NodeMut::Response(node) => self.visit_response(node),
            NodeMut::Type(node) => self.visit_type(node),
            NodeMut::Custom(node) => self.visit_custom(node),
        }
    }

    /// Visit every child of `node` in order.
    fn generic_visit(&mut self, node: NodeMut<'_>) {
        for child in node.children() {
            self.visit(child);
        }
    }

    /// Called for each [`ApiSchema`].
    fn visit_schema(&mut self, node: &mut ApiSchema) {
        self.generic_visit(NodeMut::Schema(node));
    }

    /// Called for each [`Model`].
    fn visit_model(&mut self, node: &mut Model) {
        self.generic_visit(NodeMut::Model(node));
    }

    /// Called for each [`Field`].
    fn visit_field(&mut self, node: &mut Field) {
        self.generic_visit(NodeMut::Field(node));
    }

    /// Called for each [`Enum`].
    fn visit_enum(&mut self, node: &mut Enum) {
        self.generic_visit(NodeMut::Enum(node));
    }

    /// Called for each [`EnumValue`].
    fn visit_enum_value(&mut self, node: &mut EnumValue) {
        self.generic_visit(NodeMut::EnumValue(node));
    }

    /// Called for each [`Endpoint`].
    fn visit_endpoint(&mut self, node: &mut Endpoint) {
        self.generic_visit(NodeMut::Endpoint(node));
    }

    /// Called for each [`Webhook`].
    fn visit_webhook(&mut self, node: &mut Webhook) {
        self.generic_visit(NodeMut::Webhook(node));
    }

    /// Called for each [`Operation`].
    fn visit_operation(&mut self, node: &mut Operation) {
        self.generic_visit(NodeMut::Operation(node));
    }

    /// Called for each [`Parameter`].
    fn visit_parameter(&mut self, node: &mut Parameter) {
        self.generic_visit(NodeMut::Parameter(node));
    }

    /// Called for each [`RequestBody`].
    fn visit_request_body(&mut self, node: &mut RequestBody) {
        self.generic_visit(NodeMut::RequestBody(node));
    }

    /// Called for each [`Response`].
    fn visit_response(&mut self, node: &mut Response) {
        self.generic_visit(NodeMut::Response(node));
    }

    /// Called for each [`TypeRef`].
    fn visit_type(&mut self, node: &mut TypeRef) {
        self.generic_visit(NodeMut::Type(node));
    }

    /// Called for each [`CustomNode`].
    fn visit_custom(&mut self, node: &mut CustomNode) {
        self.generic_visit(NodeMut::Custom(node));
    }
}
