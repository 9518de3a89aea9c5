//! OpenAPI 3.1.x document model.

use crate::openapi::common::{SchemaType, TypeDecl};
use crate::openapi::dialect::{Dialect, SpecVersion, define_dialect};

define_dialect! {
    dialect: V31,
    methods: [get, put, post, delete, options, head, patch, trace],
    schema {
        /// `type`
        #[serde(rename = "type")]
        pub schema_type: Option<SchemaType>,
        /// `exclusiveMaximum` as a bound of its own.
        pub exclusive_maximum: Option<f64>,
        /// `exclusiveMinimum` as a bound of its own.
        pub exclusive_minimum: Option<f64>,
        /// `const`
        #[serde(rename = "const")]
        pub const_value: Option<Value>,
        /// `$defs`
        #[serde(rename = "$defs")]
        pub defs: Option<IndexMap<String, SchemaOrBool<Schema>>>,
        /// `prefixItems`
        pub prefix_items: Option<Vec<SchemaOrBool<Schema>>>,
        /// `examples`
        pub examples: Option<Vec<Value>>,
        /// `contentMediaType`
        pub content_media_type: Option<String>,
        /// `contentEncoding`
        pub content_encoding: Option<String>,
    },
    media_type {},
    operation {},
    path_item {},
    components {
        /// `pathItems`
        pub path_items: Option<IndexMap<String, PathItem>>,
    },
    document {
        /// `jsonSchemaDialect`
        pub json_schema_dialect: Option<String>,
        /// `paths`
        #[serde(default)]
        pub paths: IndexMap<String, PathItem>,
        /// `webhooks`
        pub webhooks: Option<IndexMap<String, PathItem>>,
    },
}

impl Dialect for V31 {
    const VERSION: SpecVersion = SpecVersion::V3_1;

    type Schema = Schema;
    type MediaType = MediaType;
    type Parameter = Parameter;
    type RequestBody = RequestBody;
    type Response = Response;
    type Operation = Operation;
    type PathItem = PathItem;
    type Document = OpenApi;

    fn type_decl(schema: &Schema) -> TypeDecl<'_> {
        TypeDecl::from_type_set(schema.schema_type.as_ref())
    }

    fn webhooks(document: &OpenApi) -> Option<&IndexMap<String, PathItem>> {
        document.webhooks.as_ref()
    }
}
