use clap::Args;
use std::path::PathBuf;

use crate::cli::run_cli;
use crate::document::load_document;
use oasgraph_core::{SpecVersion, decode_openapi_document};

#[derive(Args, Debug, Clone)]
pub struct VersionArgs {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "OpenAPI document (.json, .yaml or .yml)"
    )]
    pub input: PathBuf,
}

pub fn run(args: VersionArgs) -> i32 {
    run_cli(|| {
        let version = detect_version(&args)?;
        println!("{version}");
        Ok(())
    })
}

fn detect_version(args: &VersionArgs) -> Result<SpecVersion, String> {
    let loaded = load_document(&args.input)?;
    decode_openapi_document(loaded.as_document())
        .map(|object| object.version())
        .map_err(|e| format!("{}: {e}", args.input.display()))
}
