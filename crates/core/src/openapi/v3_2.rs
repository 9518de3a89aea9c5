//! OpenAPI 3.2.x document model.

use crate::openapi::common::{SchemaType, TypeDecl};
use crate::openapi::dialect::{Dialect, SpecVersion, define_dialect};

define_dialect! {
    dialect: V32,
    methods: [get, put, post, delete, options, head, patch, trace, query],
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
    media_type {
        /// `$ref`
        #[serde(rename = "$ref")]
        pub reference: Option<String>,
        /// `itemSchema` for sequential media types.
        pub item_schema: Option<SchemaOrBool<Schema>>,
        /// `itemEncoding`
        pub item_encoding: Option<Value>,
    },
    operation {
        /// `querystring` parameter, kept undecoded.
        pub querystring: Option<Value>,
    },
    path_item {
        /// `additionalOperations`, keyed by HTTP method.
        pub additional_operations: Option<IndexMap<String, Operation>>,
    },
    components {
        /// `pathItems`
        pub path_items: Option<IndexMap<String, PathItem>>,
        /// `mediaTypes`
        pub media_types: Option<IndexMap<String, MediaType>>,
    },
    document {
        /// `$self`
        #[serde(rename = "$self")]
        pub self_uri: Option<String>,
        /// `jsonSchemaDialect`
        pub json_schema_dialect: Option<String>,
        /// `paths`
        #[serde(default)]
        pub paths: IndexMap<String, PathItem>,
        /// `webhooks`
        pub webhooks: Option<IndexMap<String, PathItem>>,
    },
}

impl Dialect for V32 {
    const VERSION: SpecVersion = SpecVersion::V3_2;

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

    fn additional_operations(item: &PathItem) -> Option<&IndexMap<String, Operation>> {
        item.additional_operations.as_ref()
    }

    fn webhooks(document: &OpenApi) -> Option<&IndexMap<String, PathItem>> {
        document.webhooks.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_slot_comes_last() {
        let item: PathItem = serde_json::from_str(
            r#"{"query": {"responses": {}}, "trace": {"responses": {}}}"#,
        )
        .unwrap();
        let methods: Vec<_> = item.fixed_operations().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["trace", "query"]);
    }

    #[test]
    fn test_additional_operations() {
        let item: PathItem = serde_json::from_str(
            r#"{"additionalOperations": {"PURGE": {"responses": {}}}}"#,
        )
        .unwrap();
        let extra = V32::additional_operations(&item).unwrap();
        assert!(extra.contains_key("PURGE"));
    }

    #[test]
    fn test_self_and_item_schema() {
        let doc: OpenApi = serde_json::from_str(
            r#"{
                "openapi": "3.2.0",
                "$self": "https://example.com/api.json",
                "info": {"title": "t", "version": "1"},
                "components": {
                    "mediaTypes": {
                        "events": {"itemSchema": {"type": "string"}}
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.self_uri.as_deref(), Some("https://example.com/api.json"));
        let media = doc.components.unwrap().media_types.unwrap();
        assert!(media["events"].item_schema.is_some());
    }
}
