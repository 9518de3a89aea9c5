//! Conversion from a typed OpenAPI document into the IR.
//!
//! One generic algorithm over [`Dialect`] handles every supported version:
//! - Component schemas are classified up front as enum, model or neither
//! - Enums and models are converted in parallel, then sorted by name
//! - Paths and webhooks keep declaration order
//! - Parameters are merged path-level first, keyed by `(name, location)`

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, trace};

use crate::openapi::common::SchemaOrBool;
use crate::openapi::dialect::{
    Dialect, DocumentAccess, MediaTypeAccess, OperationAccess, ParameterAccess, PathItemAccess,
    RequestBodyAccess, ResponseAccess, SchemaAccess,
};
use crate::openapi::v3_0::{self, V30};
use crate::openapi::v3_1::{self, V31};
use crate::openapi::v3_2::{self, V32};
use crate::openapi::OpenApiObject;

use super::enums::{Enum, EnumLiteral, EnumValue};
use super::graph::ApiSchema;
use super::node::Node;
use super::objects::{Field, FieldDefault, Model};
use super::paths::{
    Endpoint, Operation, Parameter, ParameterLocation, RequestBody, Response, Webhook,
};
use super::types::TypeRef;
use super::utils::{enum_member_names, primary_media_type, ref_to_schema_name, synthesize_operation_id};

/// Convert a decoded document of any supported version.
pub fn from_openapi(document: &OpenApiObject) -> ApiSchema {
    match document {
        OpenApiObject::V30(document) => from_openapi_30x(document),
        OpenApiObject::V31(document) => from_openapi_31x(document),
        OpenApiObject::V32(document) => from_openapi_32x(document),
    }
}

/// Convert a 3.0.x document.
pub fn from_openapi_30x(document: &v3_0::OpenApi) -> ApiSchema {
    convert_document::<V30>(document)
}

/// Convert a 3.1.x document.
pub fn from_openapi_31x(document: &v3_1::OpenApi) -> ApiSchema {
    convert_document::<V31>(document)
}

/// Convert a 3.2.x document.
pub fn from_openapi_32x(document: &v3_2::OpenApi) -> ApiSchema {
    convert_document::<V32>(document)
}

/// How a named component schema is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    Model,
    Enum,
}

fn convert_document<D: Dialect>(document: &D::Document) -> ApiSchema {
    let info = document.info();
    let mut schema = ApiSchema::new(info.title.clone(), info.version.clone());
    schema.description.clone_from(&info.description);

    let components = document.schemas();
    let converter = Converter::<D>::new(components);

    if let Some(components) = components {
        let entries: Vec<(&str, &D::Schema, Classification)> = components
            .iter()
            .filter_map(|(name, component)| {
                let class = converter.classification(name)?;
                Some((name.as_str(), component.as_schema()?, class))
            })
            .collect();

        let nodes: Vec<Node> = entries
            .par_iter()
            .map(|(name, component, class)| match class {
                Classification::Model => Node::Model(converter.convert_model(name, component)),
                Classification::Enum => Node::Enum(converter.convert_enum(name, component)),
            })
            .collect();
        for node in nodes {
            schema.add_node(node);
        }
        schema.models.sort_by(|a, b| a.name.cmp(&b.name));
        schema.enums.sort_by(|a, b| a.name.cmp(&b.name));
    }

    for (path, item) in document.paths() {
        schema.endpoints.push(Endpoint {
            path: path.clone(),
            operations: converter.convert_path_item("op", path, item),
            description: item.description().map(str::to_string),
        });
    }

    if let Some(webhooks) = D::webhooks(document) {
        for (name, item) in webhooks {
            schema.webhooks.push(Webhook {
                name: name.clone(),
                operations: converter.convert_path_item("webhook", name, item),
                description: item.description().map(str::to_string),
            });
        }
    }

    debug!(
        dialect = %D::VERSION,
        models = schema.models.len(),
        enums = schema.enums.len(),
        endpoints = schema.endpoints.len(),
        webhooks = schema.webhooks.len(),
        "Converted OpenAPI document"
    );
    schema
}

struct Converter<'a, D: Dialect> {
    classes: HashMap<&'a str, Classification>,
    dialect: PhantomData<fn() -> D>,
}

impl<'a, D: Dialect> Converter<'a, D> {
    fn new(components: Option<&'a IndexMap<String, SchemaOrBool<D::Schema>>>) -> Self {
        let mut classes = HashMap::new();
        for (name, component) in components.into_iter().flatten() {
            if let Some(class) = component.as_schema().and_then(classify::<D>) {
                trace!(schema = %name, ?class, "Classified component schema");
                classes.insert(name.as_str(), class);
            }
        }
        Self {
            classes,
            dialect: PhantomData,
        }
    }

    fn classification(&self, name: &str) -> Option<Classification> {
        self.classes.get(name).copied()
    }

    fn convert_enum(&self, name: &str, schema: &D::Schema) -> Enum {
        let literals = schema.enum_values().unwrap_or_default();
        let values = enum_member_names(literals)
            .into_iter()
            .zip(literals)
            .filter_map(|(member, literal)| {
                Some(EnumValue {
                    name: member,
                    value: EnumLiteral::from_json(literal)?,
                })
            })
            .collect();
        Enum {
            name: name.to_string(),
            values,
            description: schema.description().map(str::to_string),
        }
    }

    fn convert_model(&self, name: &str, schema: &D::Schema) -> Model {
        let required: HashSet<&str> = schema.required().iter().map(String::as_str).collect();
        let fields = schema
            .properties()
            .into_iter()
            .flatten()
            .map(|(field_name, property)| {
                let property_schema = property.as_schema();
                Field {
                    name: field_name.clone(),
                    ty: self.resolve(Some(property)),
                    required: required.contains(field_name.as_str()),
                    description: property_schema
                        .and_then(|s| s.description())
                        .map(str::to_string),
                    default: FieldDefault::from(property_schema.and_then(|s| s.default_value())),
                }
            })
            .collect();
        Model {
            name: name.to_string(),
            fields,
            description: schema.description().map(str::to_string),
        }
    }

    /// Resolve a possibly missing or boolean schema.
    fn resolve(&self, schema: Option<&SchemaOrBool<D::Schema>>) -> TypeRef {
        match schema.and_then(SchemaOrBool::as_schema) {
            Some(schema) => self.resolve_schema(schema),
            None => TypeRef::any(),
        }
    }

    fn resolve_schema(&self, schema: &D::Schema) -> TypeRef {
        if let Some(reference) = schema.reference() {
            return self.resolve_reference(reference);
        }

        let decl = D::type_decl(schema);
        let one_of = schema.one_of();
        let any_of = schema.any_of();
        let all_of = schema.all_of();

        let ty = if one_of.is_some() || any_of.is_some() || all_of.is_some() {
            let variants = [one_of, any_of, all_of]
                .into_iter()
                .flatten()
                .flatten()
                .map(|variant| self.resolve(Some(variant)))
                .collect();
            TypeRef::union(variants)
        } else if decl.is("array") {
            TypeRef::array(self.resolve(schema.items()))
        } else if decl.is("object")
            || schema.properties().is_some()
            || schema.additional_properties().is_some()
        {
            let value = match schema.additional_properties() {
                Some(SchemaOrBool::Schema(value)) => self.resolve_schema(value),
                Some(SchemaOrBool::Bool(_)) | None => TypeRef::any(),
            };
            TypeRef::map(value)
        } else {
            let format = schema.format().map(str::to_string);
            match decl.name {
                Some("integer") => TypeRef::integer(format),
                Some("number") => TypeRef::number(format),
                Some("string") => TypeRef::string(format),
                Some("boolean") => TypeRef::boolean(),
                _ => TypeRef::any(),
            }
        };
        ty.with_nullable(decl.nullable)
    }

    fn resolve_reference(&self, reference: &str) -> TypeRef {
        let Some(name) = ref_to_schema_name(reference) else {
            trace!(reference, "Unresolvable reference degraded to any");
            return TypeRef::any();
        };
        match self.classification(&name) {
            Some(Classification::Enum) => TypeRef::enum_ref(name),
            Some(Classification::Model) => TypeRef::model_ref(name),
            None => {
                trace!(reference, "Reference to unclassified schema degraded to any");
                TypeRef::any()
            }
        }
    }

    /// Fixed method slots first, then custom methods.
    fn convert_path_item(&self, prefix: &str, path: &str, item: &D::PathItem) -> Vec<Operation> {
        if let Some(reference) = item.reference() {
            debug!(path, reference, "Path item reference is not followed");
        }
        let shared = item.parameters();
        let mut operations: Vec<Operation> = item
            .fixed_operations()
            .into_iter()
            .map(|(method, operation)| {
                self.convert_operation(prefix, method, path, shared, operation)
            })
            .collect();
        if let Some(additional) = D::additional_operations(item) {
            for (method, operation) in additional {
                let method = method.to_lowercase();
                operations.push(self.convert_operation(prefix, &method, path, shared, operation));
            }
        }
        operations
    }

    fn convert_operation(
        &self,
        prefix: &str,
        method: &str,
        path: &str,
        shared: &[D::Parameter],
        operation: &D::Operation,
    ) -> Operation {
        let operation_id = operation
            .operation_id()
            .map_or_else(|| synthesize_operation_id(prefix, method, path), str::to_string);
        trace!(%operation_id, method, path, "Converting operation");

        let responses = operation
            .responses()
            .into_iter()
            .flatten()
            .filter_map(|(status, response)| self.convert_response(status, response))
            .collect();

        Operation {
            method: method.to_string(),
            path: path.to_string(),
            operation_id,
            summary: operation.summary().map(str::to_string),
            description: operation.description().map(str::to_string),
            tags: operation.tags().to_vec(),
            parameters: self.merge_parameters(shared, operation.parameters()),
            request_body: operation
                .request_body()
                .and_then(|body| self.convert_request_body(body)),
            responses,
            deprecated: operation.deprecated(),
        }
    }

    /// Later declarations replace earlier ones but keep the earlier position.
    fn merge_parameters(&self, shared: &[D::Parameter], own: &[D::Parameter]) -> Vec<Parameter> {
        let mut merged: IndexMap<(String, ParameterLocation), Parameter> = IndexMap::new();
        for parameter in shared.iter().chain(own).filter_map(|p| self.convert_parameter(p)) {
            merged.insert((parameter.name.clone(), parameter.location), parameter);
        }
        merged.into_values().collect()
    }

    fn convert_parameter(&self, parameter: &D::Parameter) -> Option<Parameter> {
        if let Some(reference) = parameter.reference() {
            trace!(reference, "Dropping referenced parameter");
            return None;
        }
        let (Some(name), Some(raw_location)) = (parameter.name(), parameter.location()) else {
            debug!("Dropping parameter without name or location");
            return None;
        };
        let Some(location) = ParameterLocation::parse(raw_location) else {
            debug!(name, location = raw_location, "Dropping parameter with unknown location");
            return None;
        };

        let ty = match parameter.schema() {
            Some(schema) => self.resolve(Some(schema)),
            None => parameter
                .content()
                .and_then(primary_media_type)
                .map_or_else(TypeRef::any, |(_, media)| self.resolve(media.schema())),
        };

        Some(Parameter {
            name: name.to_string(),
            location,
            ty,
            required: parameter.required() || location == ParameterLocation::Path,
            description: parameter.description().map(str::to_string),
            deprecated: parameter.deprecated(),
        })
    }

    fn convert_request_body(&self, body: &D::RequestBody) -> Option<RequestBody> {
        if let Some(reference) = body.reference() {
            trace!(reference, "Dropping referenced request body");
            return None;
        }
        let (content_type, media) = body.content().and_then(primary_media_type)?;
        Some(RequestBody {
            content_type: content_type.clone(),
            ty: self.resolve(media.schema()),
            required: body.required(),
            description: body.description().map(str::to_string),
        })
    }

    fn convert_response(&self, status: &str, response: &D::Response) -> Option<Response> {
        if let Some(reference) = response.reference() {
            trace!(status, reference, "Dropping referenced response");
            return None;
        }
        let content = response
            .content()
            .into_iter()
            .flatten()
            .map(|(media_type, media)| (media_type.clone(), self.resolve(media.schema())))
            .collect();
        Some(Response {
            status_code: status.to_string(),
            description: response.description().map(str::to_string),
            content,
        })
    }
}

fn classify<D: Dialect>(schema: &D::Schema) -> Option<Classification> {
    if schema.reference().is_some() {
        return None;
    }
    if let Some(values) = schema.enum_values()
        && values.iter().all(is_scalar)
    {
        return Some(Classification::Enum);
    }
    if D::type_decl(schema).is("object") || schema.properties().is_some() {
        return Some(Classification::Model);
    }
    None
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
