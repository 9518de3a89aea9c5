//! OpenAPI 3.0.x document model.

use crate::openapi::common::TypeDecl;
use crate::openapi::dialect::{Dialect, SpecVersion, define_dialect};

define_dialect! {
    dialect: V30,
    methods: [get, put, post, delete, options, head, patch, trace],
    schema {
        /// `type`
        #[serde(rename = "type")]
        pub schema_type: Option<String>,
        /// Whether `null` is allowed in addition to `type`.
        #[serde(default)]
        pub nullable: bool,
        /// `exclusiveMaximum` as a flag on `maximum`.
        pub exclusive_maximum: Option<bool>,
        /// `exclusiveMinimum` as a flag on `minimum`.
        pub exclusive_minimum: Option<bool>,
    },
    media_type {},
    operation {},
    path_item {},
    components {},
    document {
        /// `paths`
        pub paths: IndexMap<String, PathItem>,
    },
}

impl Dialect for V30 {
    const VERSION: SpecVersion = SpecVersion::V3_0;

    type Schema = Schema;
    type MediaType = MediaType;
    type Parameter = Parameter;
    type RequestBody = RequestBody;
    type Response = Response;
    type Operation = Operation;
    type PathItem = PathItem;
    type Document = OpenApi;

    fn type_decl(schema: &Schema) -> TypeDecl<'_> {
        TypeDecl::legacy(schema.schema_type.as_deref(), schema.nullable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_required() {
        let err = serde_json::from_str::<OpenApi>(
            r#"{"openapi": "3.0.3", "info": {"title": "t", "version": "1"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("paths"));
    }

    #[test]
    fn test_nullable_flag() {
        let schema: Schema =
            serde_json::from_str(r#"{"type": "string", "nullable": true}"#).unwrap();
        let decl = V30::type_decl(&schema);
        assert_eq!(decl.name, Some("string"));
        assert!(decl.nullable);
    }

    #[test]
    fn test_fixed_operations_in_slot_order() {
        let item: PathItem = serde_json::from_str(
            r#"{"post": {"responses": {}}, "get": {"responses": {}}}"#,
        )
        .unwrap();
        let methods: Vec<_> = item.fixed_operations().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["get", "post"]);
    }
}
