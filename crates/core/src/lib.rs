#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Convert OpenAPI 3.0, 3.1 and 3.2 documents into one version-independent
//! IR and hand it to pluggable code generators.
//!
//! The flow is: raw document → [`openapi::decode_openapi_document`] →
//! [`ir::from_openapi`] → optional enrichment and visiting →
//! [`generator::Generator`]. [`pipeline`] wires the steps together.
//!
//! The crate emits `tracing` events but never installs a subscriber.

pub mod error;
pub mod generator;
pub mod ir;
pub mod openapi;
pub mod pipeline;

pub use error::SchemaError;
pub use generator::{GeneratedFiles, Generator};
pub use ir::{ApiSchema, NodeVisitor, from_openapi};
pub use openapi::{OpenApiDocument, OpenApiObject, ParseError, SpecVersion, decode_openapi_document};
pub use pipeline::{
    GenerationResult, NodeFactory, PipelineOptions, apply_custom_nodes, build_schema_pipeline,
    run_generation_pipeline,
};
