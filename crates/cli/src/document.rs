//! Reading OpenAPI documents from disk.

use std::path::Path;

use oasgraph_core::OpenApiDocument;
use serde_json::Value;
use tracing::debug;

/// A document as read from disk, before version dispatch.
#[derive(Debug)]
pub enum LoadedDocument {
    /// JSON text, decoded by the core so its error messages apply
    Json(String),
    /// YAML already turned into a JSON value
    Yaml(Value),
}

impl LoadedDocument {
    pub fn as_document(&self) -> OpenApiDocument<'_> {
        match self {
            LoadedDocument::Json(text) => OpenApiDocument::Text(text),
            LoadedDocument::Yaml(value) => OpenApiDocument::Value(value.clone()),
        }
    }
}

/// Read a `.json`, `.yaml` or `.yml` file.
pub fn load_document(path: &Path) -> Result<LoadedDocument, String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded document");

    match extension.as_deref() {
        Some("json") => Ok(LoadedDocument::Json(text)),
        Some("yaml" | "yml") => serde_yaml::from_str::<Value>(&text)
            .map(LoadedDocument::Yaml)
            .map_err(|e| format!("Failed to parse YAML {}: {e}", path.display())),
        _ => Err(format!(
            "Unsupported file extension for {} (expected .json, .yaml or .yml)",
            path.display()
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_keeps_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.yml");
        fs::write(&path, "openapi: 3.1.0\nzeta: 1\nalpha: 2\n").unwrap();

        let loaded = load_document(&path).unwrap();
        let LoadedDocument::Yaml(value) = &loaded else {
            unreachable!("expected yaml");
        };
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["openapi", "zeta", "alpha"]);
    }

    #[test]
    fn test_json_is_passed_through_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.JSON");
        fs::write(&path, "{\"openapi\": \"3.0.0\"}").unwrap();
        assert!(matches!(load_document(&path).unwrap(), LoadedDocument::Json(_)));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.txt");
        fs::write(&path, "{}").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.contains("Unsupported file extension"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }
}
