//! Contract implemented by code generation backends.

use indexmap::IndexMap;

use crate::ir::{ApiSchema, Enum, Model, Node, Operation, TypeRef};

/// Output file name to file content, in emission order.
pub type GeneratedFiles = IndexMap<String, String>;

/// A backend turning the IR into source files.
///
/// The IR is read-only here; enrichment belongs in the pipeline.
pub trait Generator {
    /// Emit every file for the whole schema.
    fn generate(&self, schema: &ApiSchema) -> GeneratedFiles;

    /// Source for one model.
    fn generate_model(&self, model: &Model) -> String;

    /// Source for one enum.
    fn generate_enum(&self, item: &Enum) -> String;

    /// Source for one operation.
    fn generate_operation(&self, operation: &Operation) -> String;

    /// Target-language spelling of a type.
    fn type_to_string(&self, ty: &TypeRef) -> String;

    /// Emit a node from `custom_nodes`, or `None` to skip it.
    fn generate_custom_node(&self, _node: &Node) -> Option<String> {
        None
    }
}
