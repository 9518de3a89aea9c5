//! Accessor traits shared by the 3.0, 3.1 and 3.2 document structures.
//!
//! The converter is written once against [`Dialect`]; each versioned module
//! generates its structures from the shared field table in
//! [`define_dialect!`] and only spells out the fields that differ.

use indexmap::IndexMap;
use serde_json::Value;

use super::common::{Info, SchemaOrBool, TypeDecl};

/// The three supported document models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    /// OpenAPI 3.0.x
    V3_0,
    /// OpenAPI 3.1.x
    V3_1,
    /// OpenAPI 3.2.x
    V3_2,
}

impl SpecVersion {
    /// Short form such as `"3.1"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::V3_0 => "3.0",
            SpecVersion::V3_1 => "3.1",
            SpecVersion::V3_2 => "3.2",
        }
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One versioned family of document structures.
pub trait Dialect: Sized + 'static {
    /// Version this dialect decodes.
    const VERSION: SpecVersion;

    /// Schema Object.
    type Schema: SchemaAccess + Sync;
    /// Media Type Object.
    type MediaType: MediaTypeAccess<Self>;
    /// Parameter Object.
    type Parameter: ParameterAccess<Self>;
    /// Request Body Object.
    type RequestBody: RequestBodyAccess<Self>;
    /// Response Object.
    type Response: ResponseAccess<Self>;
    /// Operation Object.
    type Operation: OperationAccess<Self>;
    /// Path Item Object.
    type PathItem: PathItemAccess<Self>;
    /// OpenAPI Object (document root).
    type Document: DocumentAccess<Self>;

    /// Effective type name and nullability of a schema.
    fn type_decl(schema: &Self::Schema) -> TypeDecl<'_>;

    /// Operations for custom HTTP methods (3.2 `additionalOperations`).
    fn additional_operations(_item: &Self::PathItem) -> Option<&IndexMap<String, Self::Operation>> {
        None
    }

    /// Provider-initiated operations (3.1+).
    fn webhooks(_document: &Self::Document) -> Option<&IndexMap<String, Self::PathItem>> {
        None
    }
}

/// Read access to the schema keywords the converter uses.
pub trait SchemaAccess: Sized {
    /// `$ref`
    fn reference(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// `format`
    fn format(&self) -> Option<&str>;
    /// `enum`
    fn enum_values(&self) -> Option<&[Value]>;
    /// `default`
    fn default_value(&self) -> Option<&Value>;
    /// `properties`, in declaration order.
    fn properties(&self) -> Option<&IndexMap<String, SchemaOrBool<Self>>>;
    /// `required`, empty when absent.
    fn required(&self) -> &[String];
    /// `items`
    fn items(&self) -> Option<&SchemaOrBool<Self>>;
    /// `additionalProperties`
    fn additional_properties(&self) -> Option<&SchemaOrBool<Self>>;
    /// `oneOf`
    fn one_of(&self) -> Option<&[SchemaOrBool<Self>]>;
    /// `anyOf`
    fn any_of(&self) -> Option<&[SchemaOrBool<Self>]>;
    /// `allOf`
    fn all_of(&self) -> Option<&[SchemaOrBool<Self>]>;
}

/// Read access to a Media Type Object.
pub trait MediaTypeAccess<D: Dialect> {
    /// `schema`
    fn schema(&self) -> Option<&SchemaOrBool<D::Schema>>;
}

/// Read access to a Parameter Object.
pub trait ParameterAccess<D: Dialect> {
    /// `$ref`
    fn reference(&self) -> Option<&str>;
    /// `name`
    fn name(&self) -> Option<&str>;
    /// `in`
    fn location(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// `required`, false when absent.
    fn required(&self) -> bool;
    /// `deprecated`, false when absent.
    fn deprecated(&self) -> bool;
    /// `schema`
    fn schema(&self) -> Option<&SchemaOrBool<D::Schema>>;
    /// `content`, used when `schema` is absent.
    fn content(&self) -> Option<&IndexMap<String, D::MediaType>>;
}

/// Read access to a Request Body Object.
pub trait RequestBodyAccess<D: Dialect> {
    /// `$ref`
    fn reference(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// `required`, false when absent.
    fn required(&self) -> bool;
    /// `content`
    fn content(&self) -> Option<&IndexMap<String, D::MediaType>>;
}

/// Read access to a Response Object.
pub trait ResponseAccess<D: Dialect> {
    /// `$ref`
    fn reference(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// `content`
    fn content(&self) -> Option<&IndexMap<String, D::MediaType>>;
}

/// Read access to an Operation Object.
pub trait OperationAccess<D: Dialect> {
    /// `operationId`
    fn operation_id(&self) -> Option<&str>;
    /// `summary`
    fn summary(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// `tags`, empty when absent.
    fn tags(&self) -> &[String];
    /// `deprecated`, false when absent.
    fn deprecated(&self) -> bool;
    /// `parameters`, empty when absent.
    fn parameters(&self) -> &[D::Parameter];
    /// `requestBody`
    fn request_body(&self) -> Option<&D::RequestBody>;
    /// `responses`, keyed by status code.
    fn responses(&self) -> Option<&IndexMap<String, D::Response>>;
}

/// Read access to a Path Item Object.
pub trait PathItemAccess<D: Dialect> {
    /// `$ref`
    fn reference(&self) -> Option<&str>;
    /// `description`
    fn description(&self) -> Option<&str>;
    /// Parameters shared by every operation on the path.
    fn parameters(&self) -> &[D::Parameter];
    /// Operations in the fixed method slots, in slot order.
    fn fixed_operations(&self) -> Vec<(&'static str, &D::Operation)>;
}

/// Read access to the document root.
pub trait DocumentAccess<D: Dialect> {
    /// `info`
    fn info(&self) -> &Info;
    /// `paths`, empty when absent.
    fn paths(&self) -> &IndexMap<String, D::PathItem>;
    /// `components.schemas`
    fn schemas(&self) -> Option<&IndexMap<String, SchemaOrBool<D::Schema>>>;
}

/// Generates one dialect's structures from the shared field table.
///
/// Every block takes the fields that only this version defines; the shared
/// fields and the accessor impls are emitted here. `document` extras must
/// declare `paths`, since its optionality differs between versions.
macro_rules! define_dialect {
    (
        dialect: $dialect:ident,
        methods: [$($method:ident),* $(,)?],
        schema { $($schema_extra:tt)* },
        media_type { $($media_type_extra:tt)* },
        operation { $($operation_extra:tt)* },
        path_item { $($path_item_extra:tt)* },
        components { $($components_extra:tt)* },
        document { $($document_extra:tt)* } $(,)?
    ) => {
        use indexmap::IndexMap;
        use serde::Deserialize;
        use serde_json::Value;

        use $crate::openapi::common::{
            Discriminator, ExternalDocumentation, Info, SchemaOrBool, Server, Tag, Xml,
        };
        use $crate::openapi::dialect::{
            DocumentAccess, MediaTypeAccess, OperationAccess, ParameterAccess, PathItemAccess,
            RequestBodyAccess, ResponseAccess, SchemaAccess,
        };

        /// Marker type selecting this document model.
        #[derive(Debug, Clone, Copy)]
        pub enum $dialect {}

        /// JSON Schema object as used by this dialect.
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Schema {
            /// `$ref`
            #[serde(rename = "$ref")]
            pub reference: Option<String>,
            /// `title`
            pub title: Option<String>,
            /// `description`
            pub description: Option<String>,
            /// `format`
            pub format: Option<String>,
            /// `enum`
            #[serde(rename = "enum")]
            pub enum_values: Option<Vec<Value>>,
            /// `default`
            pub default: Option<Value>,
            /// `multipleOf`
            pub multiple_of: Option<f64>,
            /// `maximum`
            pub maximum: Option<f64>,
            /// `minimum`
            pub minimum: Option<f64>,
            /// `maxLength`
            pub max_length: Option<u64>,
            /// `minLength`
            pub min_length: Option<u64>,
            /// `pattern`
            pub pattern: Option<String>,
            /// `maxItems`
            pub max_items: Option<u64>,
            /// `minItems`
            pub min_items: Option<u64>,
            /// `uniqueItems`
            pub unique_items: Option<bool>,
            /// `maxProperties`
            pub max_properties: Option<u64>,
            /// `minProperties`
            pub min_properties: Option<u64>,
            /// `required`
            pub required: Option<Vec<String>>,
            /// `allOf`
            pub all_of: Option<Vec<SchemaOrBool<Schema>>>,
            /// `anyOf`
            pub any_of: Option<Vec<SchemaOrBool<Schema>>>,
            /// `oneOf`
            pub one_of: Option<Vec<SchemaOrBool<Schema>>>,
            /// `not`
            pub not: Option<SchemaOrBool<Schema>>,
            /// `items`
            pub items: Option<SchemaOrBool<Schema>>,
            /// `properties`
            pub properties: Option<IndexMap<String, SchemaOrBool<Schema>>>,
            /// `additionalProperties`
            pub additional_properties: Option<SchemaOrBool<Schema>>,
            /// `discriminator`
            pub discriminator: Option<Discriminator>,
            /// `readOnly`
            pub read_only: Option<bool>,
            /// `writeOnly`
            pub write_only: Option<bool>,
            /// `deprecated`
            pub deprecated: Option<bool>,
            /// `example`
            pub example: Option<Value>,
            /// `xml`
            pub xml: Option<Xml>,
            /// `externalDocs`
            pub external_docs: Option<ExternalDocumentation>,
            $($schema_extra)*
        }

        /// Schema and examples for one media type.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct MediaType {
            /// `schema`
            pub schema: Option<SchemaOrBool<Schema>>,
            /// `example`
            pub example: Option<Value>,
            /// `examples`
            pub examples: Option<IndexMap<String, Value>>,
            /// `encoding`
            pub encoding: Option<IndexMap<String, Value>>,
            $($media_type_extra)*
        }

        /// A single operation parameter.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Parameter {
            /// `$ref`
            #[serde(rename = "$ref")]
            pub reference: Option<String>,
            /// `name`
            pub name: Option<String>,
            /// `in`
            #[serde(rename = "in")]
            pub location: Option<String>,
            /// `description`
            pub description: Option<String>,
            /// `required`
            #[serde(default)]
            pub required: bool,
            /// `deprecated`
            #[serde(default)]
            pub deprecated: bool,
            /// `allowEmptyValue`
            #[serde(default)]
            pub allow_empty_value: bool,
            /// `style`
            pub style: Option<String>,
            /// `explode`
            pub explode: Option<bool>,
            /// `allowReserved`
            #[serde(default)]
            pub allow_reserved: bool,
            /// `schema`
            pub schema: Option<SchemaOrBool<Schema>>,
            /// `example`
            pub example: Option<Value>,
            /// `examples`
            pub examples: Option<IndexMap<String, Value>>,
            /// `content`
            pub content: Option<IndexMap<String, MediaType>>,
        }

        /// A request body definition.
        #[derive(Debug, Clone, Deserialize)]
        pub struct RequestBody {
            /// `$ref`
            #[serde(rename = "$ref")]
            pub reference: Option<String>,
            /// `description`
            pub description: Option<String>,
            /// `content`
            pub content: Option<IndexMap<String, MediaType>>,
            /// `required`
            #[serde(default)]
            pub required: bool,
        }

        /// A response definition.
        #[derive(Debug, Clone, Deserialize)]
        pub struct Response {
            /// `$ref`
            #[serde(rename = "$ref")]
            pub reference: Option<String>,
            /// `description`
            pub description: Option<String>,
            /// `headers`
            pub headers: Option<IndexMap<String, Value>>,
            /// `content`
            pub content: Option<IndexMap<String, MediaType>>,
            /// `links`
            pub links: Option<IndexMap<String, Value>>,
        }

        /// An API operation.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Operation {
            /// `tags`
            pub tags: Option<Vec<String>>,
            /// `summary`
            pub summary: Option<String>,
            /// `description`
            pub description: Option<String>,
            /// `externalDocs`
            pub external_docs: Option<ExternalDocumentation>,
            /// `operationId`
            pub operation_id: Option<String>,
            /// `parameters`
            pub parameters: Option<Vec<Parameter>>,
            /// `requestBody`
            pub request_body: Option<RequestBody>,
            /// `responses`
            pub responses: Option<IndexMap<String, Response>>,
            /// `callbacks`
            pub callbacks: Option<IndexMap<String, Value>>,
            /// `deprecated`
            #[serde(default)]
            pub deprecated: bool,
            /// `security`
            pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
            /// `servers`
            pub servers: Option<Vec<Server>>,
            $($operation_extra)*
        }

        /// The operations available on a single path.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct PathItem {
            /// `$ref`
            #[serde(rename = "$ref")]
            pub reference: Option<String>,
            /// `summary`
            pub summary: Option<String>,
            /// `description`
            pub description: Option<String>,
            $(
                #[doc = concat!("`", stringify!($method), "` operation")]
                pub $method: Option<Operation>,
            )*
            /// `servers`
            pub servers: Option<Vec<Server>>,
            /// `parameters`
            pub parameters: Option<Vec<Parameter>>,
            $($path_item_extra)*
        }

        /// Reusable objects.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Components {
            /// `schemas`
            pub schemas: Option<IndexMap<String, SchemaOrBool<Schema>>>,
            /// `responses`
            pub responses: Option<IndexMap<String, Response>>,
            /// `parameters`
            pub parameters: Option<IndexMap<String, Parameter>>,
            /// `examples`
            pub examples: Option<IndexMap<String, Value>>,
            /// `requestBodies`
            pub request_bodies: Option<IndexMap<String, RequestBody>>,
            /// `headers`
            pub headers: Option<IndexMap<String, Value>>,
            /// `securitySchemes`
            pub security_schemes: Option<IndexMap<String, Value>>,
            /// `links`
            pub links: Option<IndexMap<String, Value>>,
            /// `callbacks`
            pub callbacks: Option<IndexMap<String, Value>>,
            $($components_extra)*
        }

        /// Root document object.
        #[derive(Debug, Clone, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct OpenApi {
            /// `openapi`
            pub openapi: String,
            /// `info`
            pub info: Info,
            /// `servers`
            pub servers: Option<Vec<Server>>,
            /// `components`
            pub components: Option<Components>,
            /// `security`
            pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
            /// `tags`
            pub tags: Option<Vec<Tag>>,
            /// `externalDocs`
            pub external_docs: Option<ExternalDocumentation>,
            $($document_extra)*
        }

        impl SchemaAccess for Schema {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn format(&self) -> Option<&str> {
                self.format.as_deref()
            }
            fn enum_values(&self) -> Option<&[Value]> {
                self.enum_values.as_deref()
            }
            fn default_value(&self) -> Option<&Value> {
                self.default.as_ref()
            }
            fn properties(&self) -> Option<&IndexMap<String, SchemaOrBool<Schema>>> {
                self.properties.as_ref()
            }
            fn required(&self) -> &[String] {
                self.required.as_deref().unwrap_or_default()
            }
            fn items(&self) -> Option<&SchemaOrBool<Schema>> {
                self.items.as_ref()
            }
            fn additional_properties(&self) -> Option<&SchemaOrBool<Schema>> {
                self.additional_properties.as_ref()
            }
            fn one_of(&self) -> Option<&[SchemaOrBool<Schema>]> {
                self.one_of.as_deref()
            }
            fn any_of(&self) -> Option<&[SchemaOrBool<Schema>]> {
                self.any_of.as_deref()
            }
            fn all_of(&self) -> Option<&[SchemaOrBool<Schema>]> {
                self.all_of.as_deref()
            }
        }

        impl MediaTypeAccess<$dialect> for MediaType {
            fn schema(&self) -> Option<&SchemaOrBool<Schema>> {
                self.schema.as_ref()
            }
        }

        impl ParameterAccess<$dialect> for Parameter {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
            fn location(&self) -> Option<&str> {
                self.location.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn required(&self) -> bool {
                self.required
            }
            fn deprecated(&self) -> bool {
                self.deprecated
            }
            fn schema(&self) -> Option<&SchemaOrBool<Schema>> {
                self.schema.as_ref()
            }
            fn content(&self) -> Option<&IndexMap<String, MediaType>> {
                self.content.as_ref()
            }
        }

        impl RequestBodyAccess<$dialect> for RequestBody {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn required(&self) -> bool {
                self.required
            }
            fn content(&self) -> Option<&IndexMap<String, MediaType>> {
                self.content.as_ref()
            }
        }

        impl ResponseAccess<$dialect> for Response {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn content(&self) -> Option<&IndexMap<String, MediaType>> {
                self.content.as_ref()
            }
        }

        impl OperationAccess<$dialect> for Operation {
            fn operation_id(&self) -> Option<&str> {
                self.operation_id.as_deref()
            }
            fn summary(&self) -> Option<&str> {
                self.summary.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn tags(&self) -> &[String] {
                self.tags.as_deref().unwrap_or_default()
            }
            fn deprecated(&self) -> bool {
                self.deprecated
            }
            fn parameters(&self) -> &[Parameter] {
                self.parameters.as_deref().unwrap_or_default()
            }
            fn request_body(&self) -> Option<&RequestBody> {
                self.request_body.as_ref()
            }
            fn responses(&self) -> Option<&IndexMap<String, Response>> {
                self.responses.as_ref()
            }
        }

        impl PathItemAccess<$dialect> for PathItem {
            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn parameters(&self) -> &[Parameter] {
                self.parameters.as_deref().unwrap_or_default()
            }
            fn fixed_operations(&self) -> Vec<(&'static str, &Operation)> {
                let mut operations = Vec::new();
                $(
                    if let Some(operation) = &self.$method {
                        operations.push((stringify!($method), operation));
                    }
                )*
                operations
            }
        }

        impl DocumentAccess<$dialect> for OpenApi {
            fn info(&self) -> &Info {
                &self.info
            }
            fn paths(&self) -> &IndexMap<String, PathItem> {
                &self.paths
            }
            fn schemas(&self) -> Option<&IndexMap<String, SchemaOrBool<Schema>>> {
                self.components.as_ref().and_then(|c| c.schemas.as_ref())
            }
        }
    };
}

pub(crate) use define_dialect;
