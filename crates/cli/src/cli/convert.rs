use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::run_cli;
use crate::document::load_document;
use oasgraph_core::{ApiSchema, PipelineOptions, build_schema_pipeline};

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "OpenAPI document (.json, .yaml or .yml)"
    )]
    pub input: PathBuf,
    #[arg(
        short = 'o',
        long = "out",
        value_name = "FILE",
        help = "Write the IR here instead of stdout"
    )]
    pub out: Option<PathBuf>,
    #[arg(long = "validate", help = "Fail on dangling or ambiguous type references")]
    pub validate: bool,
    #[arg(long = "compact", help = "Emit single-line JSON")]
    pub compact: bool,
}

pub fn run(args: ConvertArgs) -> i32 {
    run_cli(|| convert(&args))
}

fn convert(args: &ConvertArgs) -> Result<(), String> {
    let loaded = load_document(&args.input)?;
    let (openapi, schema) = build_schema_pipeline(
        loaded.as_document(),
        PipelineOptions::new().with_validation(args.validate),
    )
    .map_err(|e| format!("{}: {e}", args.input.display()))?;

    info!(
        dialect = %openapi.version(),
        models = schema.models.len(),
        enums = schema.enums.len(),
        endpoints = schema.endpoints.len(),
        webhooks = schema.webhooks.len(),
        "Converted {}",
        args.input.display()
    );

    let rendered = render_schema(&schema, args.compact)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            debug!(path = %path.display(), "Wrote IR");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render_schema(schema: &ApiSchema, compact: bool) -> Result<String, String> {
    let rendered = if compact {
        serde_json::to_string(schema)
    } else {
        serde_json::to_string_pretty(schema)
    };
    rendered.map_err(|e| format!("Failed to serialize IR: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    const PETS_YAML: &str = r#"openapi: 3.1.0
info:
  title: Pets
  version: "1.0"
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id:
          type: integer
        status:
          $ref: '#/components/schemas/Status'
    Status:
      type: string
      enum: [available, sold]
"#;

    fn args(input: PathBuf, out: Option<PathBuf>) -> ConvertArgs {
        ConvertArgs {
            input,
            out,
            validate: true,
            compact: false,
        }
    }

    #[test]
    fn test_convert_yaml_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("pets.yaml");
        let out = dir.path().join("ir.json");
        fs::write(&input, PETS_YAML).unwrap();

        convert(&args(input, Some(out.clone()))).unwrap();

        let ir: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(ir["title"], "Pets");
        assert_eq!(ir["models"][0]["name"], "Pet");
        assert_eq!(ir["enums"][0]["name"], "Status");
        assert_eq!(ir["endpoints"][0]["path"], "/pets");
        assert_eq!(ir["endpoints"][0]["operations"][0]["operation_id"], "listPets");
    }

    #[test]
    fn test_convert_json_matches_yaml() {
        let dir = TempDir::new().unwrap();
        let yaml_in = dir.path().join("pets.yml");
        let json_in = dir.path().join("pets.json");
        let yaml_out = dir.path().join("from_yaml.json");
        let json_out = dir.path().join("from_json.json");

        fs::write(&yaml_in, PETS_YAML).unwrap();
        let value: Value = serde_yaml::from_str(PETS_YAML).unwrap();
        fs::write(&json_in, serde_json::to_string(&value).unwrap()).unwrap();

        convert(&args(yaml_in, Some(yaml_out.clone()))).unwrap();
        convert(&args(json_in, Some(json_out.clone()))).unwrap();

        assert_eq!(
            fs::read_to_string(yaml_out).unwrap(),
            fs::read_to_string(json_out).unwrap()
        );
    }

    #[test]
    fn test_unsupported_version_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("old.json");
        fs::write(
            &input,
            r#"{"openapi": "2.0.0", "info": {"title": "t", "version": "1"}, "paths": {}}"#,
        )
        .unwrap();

        let err = convert(&args(input, None)).unwrap_err();
        assert!(err.contains("old.json"));
        assert_eq!(run(args(dir.path().join("old.json"), None)), 1);
    }

    #[test]
    fn test_dangling_reference_degrades_to_any() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("dangling.yaml");
        let out = dir.path().join("ir.json");
        fs::write(
            &input,
            PETS_YAML.replace("'#/components/schemas/Status'", "'#/components/schemas/Missing'"),
        )
        .unwrap();

        convert(&args(input, Some(out.clone()))).unwrap();

        let ir: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let status = &ir["models"][0]["fields"][1];
        assert_eq!(status["name"], "status");
        assert_eq!(status["type"]["kind"], "any");
    }

    #[test]
    fn test_compact_rendering() {
        let schema = ApiSchema::new("t", "1");
        let compact = render_schema(&schema, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(render_schema(&schema, false).unwrap().contains('\n'));
    }
}
