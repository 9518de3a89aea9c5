//! Decode, convert, enrich, visit and generate in one call.

use tracing::debug;

use crate::error::SchemaError;
use crate::generator::{GeneratedFiles, Generator};
use crate::ir::{ApiSchema, Node, NodeMut, NodeVisitor, from_openapi};
use crate::openapi::{OpenApiDocument, OpenApiObject, decode_openapi_document};

/// Produces extra nodes from the IR built so far.
///
/// Implemented for any `Fn(&ApiSchema) -> I` where `I` yields nodes, so a
/// factory may return `None`, a single `Some(node)`, or a `Vec`.
pub trait NodeFactory {
    /// Nodes to add to `schema`.
    fn produce(&self, schema: &ApiSchema) -> Vec<Node>;
}

impl<F, I> NodeFactory for F
where
    F: Fn(&ApiSchema) -> I,
    I: IntoIterator<Item = Node>,
{
    fn produce(&self, schema: &ApiSchema) -> Vec<Node> {
        self(schema).into_iter().collect()
    }
}

/// Enrichment and checking steps applied after conversion.
#[derive(Default)]
pub struct PipelineOptions<'a> {
    custom_nodes: Vec<Node>,
    factories: Vec<Box<dyn NodeFactory + 'a>>,
    visitor: Option<&'a mut dyn NodeVisitor>,
    validate: bool,
}

impl std::fmt::Debug for PipelineOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("custom_nodes", &self.custom_nodes)
            .field("factories", &self.factories.len())
            .field("visitor", &self.visitor.is_some())
            .field("validate", &self.validate)
            .finish()
    }
}

impl<'a> PipelineOptions<'a> {
    /// No enrichment and no validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one node to attach after conversion.
    pub fn with_custom_node(mut self, node: impl Into<Node>) -> Self {
        self.custom_nodes.push(node.into());
        self
    }

    /// Add several nodes to attach after conversion.
    pub fn with_custom_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.custom_nodes.extend(nodes);
        self
    }

    /// Add a factory, run after the static nodes are attached.
    pub fn with_factory(mut self, factory: impl NodeFactory + 'a) -> Self {
        self.factories.push(Box::new(factory));
        self
    }

    /// Visit the whole schema once enrichment is done.
    pub fn with_visitor(mut self, visitor: &'a mut dyn NodeVisitor) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Run [`ApiSchema::validate`] after all other steps.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

/// Output of [`run_generation_pipeline`].
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The decoded document
    pub openapi: OpenApiObject,
    /// The enriched IR the generator saw
    pub schema: ApiSchema,
    /// Generator output
    pub files: GeneratedFiles,
}

/// Decode and convert a document, then apply the configured enrichment.
pub fn build_schema_pipeline<'d>(
    document: impl Into<OpenApiDocument<'d>>,
    options: PipelineOptions<'_>,
) -> Result<(OpenApiObject, ApiSchema), SchemaError> {
    let PipelineOptions {
        custom_nodes,
        factories,
        visitor,
        validate,
    } = options;

    let openapi = decode_openapi_document(document)?;
    let mut schema = from_openapi(&openapi);
    apply_custom_nodes(&mut schema, custom_nodes, &factories);

    if let Some(visitor) = visitor {
        debug!("Running visitor over schema");
        visitor.visit(NodeMut::from(&mut schema));
    }
    if validate {
        schema.validate()?;
    }
    Ok((openapi, schema))
}

/// Run [`build_schema_pipeline`] and hand the result to a generator.
pub fn run_generation_pipeline<'d>(
    document: impl Into<OpenApiDocument<'d>>,
    generator: &dyn Generator,
    options: PipelineOptions<'_>,
) -> Result<GenerationResult, SchemaError> {
    let (openapi, schema) = build_schema_pipeline(document, options)?;
    let files = generator.generate(&schema);
    debug!(files = files.len(), "Generation finished");
    Ok(GenerationResult {
        openapi,
        schema,
        files,
    })
}

/// Attach static nodes first, then the output of each factory in order.
///
/// Each factory sees the nodes added before it.
pub fn apply_custom_nodes<'s, N>(
    schema: &'s mut ApiSchema,
    nodes: N,
    factories: &[Box<dyn NodeFactory + '_>],
) -> &'s mut ApiSchema
where
    N: IntoIterator<Item = Node>,
{
    for node in nodes {
        schema.add_node(node);
    }
    for factory in factories {
        let produced = factory.produce(schema);
        debug!(count = produced.len(), "Factory produced nodes");
        for node in produced {
            schema.add_node(node);
        }
    }
    schema
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::{CustomNode, Model, NodeKind};
    use serde_json::json;

    const DOC: &str = r##"{
        "openapi": "3.0.3",
        "info": {"title": "Pipeline", "version": "1"},
        "paths": {},
        "components": {"schemas": {"Pet": {"type": "object"}}}
    }"##;

    #[test]
    fn test_default_options_only_convert() {
        let (openapi, schema) = build_schema_pipeline(DOC, PipelineOptions::new()).unwrap();
        assert_eq!(openapi.openapi(), "3.0.3");
        assert_eq!(schema.models.len(), 1);
        assert!(schema.custom_nodes.is_empty());
    }

    #[test]
    fn test_static_nodes_before_factories() {
        let options = PipelineOptions::new()
            .with_custom_node(CustomNode::new("marker", "static", json!(1)))
            .with_factory(|schema: &ApiSchema| {
                let seen = schema.custom_nodes.len();
                Some(Node::Custom(CustomNode::new("marker", "dynamic", json!(seen))))
            })
            .with_factory(|_: &ApiSchema| None::<Node>)
            .with_factory(|schema: &ApiSchema| {
                vec![
                    Node::Model(Model {
                        name: format!("{}Extra", schema.models[0].name),
                        fields: Vec::new(),
                        description: None,
                    }),
                    Node::Custom(CustomNode::new("marker", "last", json!(null))),
                ]
            });
        let (_, schema) = build_schema_pipeline(DOC, options).unwrap();

        let names: Vec<_> = schema.custom_nodes.iter().filter_map(Node::name).collect();
        assert_eq!(names, vec!["static", "dynamic", "last"]);
        assert_eq!(
            schema.custom_nodes[1],
            Node::Custom(CustomNode::new("marker", "dynamic", json!(1)))
        );
        assert!(schema.get_model("PetExtra").is_some());
        assert!(
            schema
                .custom_nodes
                .iter()
                .all(|node| node.kind() == NodeKind::Custom)
        );
    }

    #[test]
    fn test_parse_failure_becomes_conversion_error() {
        let err = build_schema_pipeline(r#"{"openapi": "4.0.0"}"#, PipelineOptions::new())
            .unwrap_err();
        assert!(matches!(err, SchemaError::Conversion { .. }));
        assert_eq!(err.path(), Some("/openapi"));
        assert_eq!(err.to_string(), "/openapi: Unsupported OpenAPI major version: 4");
    }

    #[test]
    fn test_validation_is_opt_in() {
        let dangling = || {
            PipelineOptions::new().with_custom_node(crate::ir::TypeRef::model_ref("Ghost"))
        };
        assert!(build_schema_pipeline(DOC, dangling()).is_ok());

        let err = build_schema_pipeline(DOC, dangling().with_validation(true)).unwrap_err();
        assert!(matches!(err, SchemaError::Validation { .. }));
        assert!(err.to_string().contains("'Ghost'"));
    }

    struct Uppercase;

    impl NodeVisitor for Uppercase {
        fn visit_model(&mut self, node: &mut Model) {
            node.name = node.name.to_uppercase();
        }
    }

    #[test]
    fn test_visitor_runs_after_enrichment() {
        let mut visitor = Uppercase;
        let options = PipelineOptions::new()
            .with_custom_node(Model {
                name: "added".into(),
                fields: Vec::new(),
                description: None,
            })
            .with_visitor(&mut visitor);
        let (_, schema) = build_schema_pipeline(DOC, options).unwrap();
        let names: Vec<_> = schema.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["PET", "ADDED"]);
    }
}
