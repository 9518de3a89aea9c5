//! The IR root and its registries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::enums::Enum;
use super::node::Node;
use super::objects::Model;
use super::paths::{Endpoint, Operation, Webhook};
use super::types::TypeRef;
use crate::error::SchemaError;

/// Version-independent representation of one API.
///
/// Registries are flat; types refer to models and enums by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSchema {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// `info.description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object models, sorted by name
    #[serde(default)]
    pub models: Vec<Model>,
    /// Enumerations, sorted by name
    #[serde(default)]
    pub enums: Vec<Enum>,
    /// Paths in declaration order
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Webhooks in declaration order
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
    /// Nodes without a dedicated registry
    #[serde(default)]
    pub custom_nodes: Vec<Node>,
}

impl ApiSchema {
    /// Empty schema with the given metadata.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            models: Vec::new(),
            enums: Vec::new(),
            endpoints: Vec::new(),
            webhooks: Vec::new(),
            custom_nodes: Vec::new(),
        }
    }

    /// Model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Enum by name.
    pub fn get_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|item| item.name == name)
    }

    /// Endpoint by URL template.
    pub fn get_endpoint(&self, path: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.path == path)
    }

    /// Operations of every endpoint followed by those of every webhook.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.endpoints
            .iter()
            .flat_map(|endpoint| endpoint.operations.iter())
            .chain(
                self.webhooks
                    .iter()
                    .flat_map(|webhook| webhook.operations.iter()),
            )
    }

    /// Attach a node to the registry matching its kind.
    pub fn add_node(&mut self, node: impl Into<Node>) {
        match node.into() {
            Node::Model(model) => self.models.push(model),
            Node::Enum(item) => self.enums.push(item),
            Node::Endpoint(endpoint) => self.endpoints.push(endpoint),
            Node::Webhook(webhook) => self.webhooks.push(webhook),
            other => self.custom_nodes.push(other),
        }
    }

    /// Check that every model/enum reference resolves and that no name is
    /// registered as both a model and an enum.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let models: HashSet<&str> = self.models.iter().map(|m| m.name.as_str()).collect();
        let enums: HashSet<&str> = self.enums.iter().map(|e| e.name.as_str()).collect();
        let mut problems = Vec::new();

        let mut clashes: Vec<&str> = models.intersection(&enums).copied().collect();
        clashes.sort_unstable();
        for name in clashes {
            problems.push(format!("'{name}' is registered as both a model and an enum"));
        }

        for (location, ty) in self.typed_slots() {
            for (name, is_model) in ty.referenced_names() {
                if is_model && !models.contains(name) {
                    problems.push(format!("{location}: unknown model reference '{name}'"));
                } else if !is_model && !enums.contains(name) {
                    problems.push(format!("{location}: unknown enum reference '{name}'"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::validation(problems.join("; ")))
        }
    }

    /// Every top-level type reference with a human readable location.
    fn typed_slots(&self) -> Vec<(String, &TypeRef)> {
        let mut slots = Vec::new();
        for model in &self.models {
            for field in &model.fields {
                slots.push((format!("{}.{}", model.name, field.name), &field.ty));
            }
        }
        for operation in self.operations() {
            operation_slots(operation, &mut slots);
        }
        for node in &self.custom_nodes {
            match node {
                Node::Model(model) => {
                    for field in &model.fields {
                        slots.push((format!("{}.{}", model.name, field.name), &field.ty));
                    }
                }
                Node::Field(field) => slots.push((format!("field {}", field.name), &field.ty)),
                Node::Operation(operation) => operation_slots(operation, &mut slots),
                Node::Parameter(parameter) => {
                    slots.push((format!("parameter {}", parameter.name), &parameter.ty));
                }
                Node::RequestBody(body) => slots.push(("request body".to_string(), &body.ty)),
                Node::Response(response) => {
                    for ty in response.content.values() {
                        slots.push((format!("response {}", response.status_code), ty));
                    }
                }
                Node::Type(ty) => slots.push(("custom type".to_string(), ty)),
                Node::Endpoint(endpoint) => {
                    for operation in &endpoint.operations {
                        operation_slots(operation, &mut slots);
                    }
                }
                Node::Webhook(webhook) => {
                    for operation in &webhook.operations {
                        operation_slots(operation, &mut slots);
                    }
                }
                Node::Enum(_) | Node::EnumValue(_) | Node::Custom(_) => {}
            }
        }
        slots
    }
}

fn operation_slots<'a>(operation: &'a Operation, slots: &mut Vec<(String, &'a TypeRef)>) {
    let label = format!(
        "{} {}",
        operation.method.to_uppercase(),
        operation.path
    );
    for parameter in &operation.parameters {
        slots.push((format!("{label} parameter {}", parameter.name), &parameter.ty));
    }
    if let Some(body) = &operation.request_body {
        slots.push((format!("{label} request body"), &body.ty));
    }
    for response in &operation.responses {
        for (media_type, ty) in &response.content {
            slots.push((
                format!("{label} response {} {media_type}", response.status_code),
                ty,
            ));
        }
    }
}
