//! Schema loader
//!
//! Loads a field schema from a YAML or JSON file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::Schema;

pub struct SchemaLoader {
    path: PathBuf,
}

impl SchemaLoader {
    pub const ENV_VAR: &'static str = "FIELDMASK_SCHEMA";
    pub const DEFAULT_PATH: &'static str = "fieldmask.yaml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create loader from FIELDMASK_SCHEMA env var or default to "fieldmask.yaml"
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) => Self::new(path),
            Err(_) => Self::new(Self::DEFAULT_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the schema. Files ending in `.json` are parsed as JSON, anything
    /// else as YAML.
    pub fn load(&self) -> Result<Schema> {
        let path = &self.path;
        info!("Loading field schema from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let schema = if is_json {
            Schema::from_json_str(&content)
        } else {
            Schema::from_yaml_str(&content)
        }
        .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded {} fields", schema.len());
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(".yaml", "phone: phone\nnick: username\n");
        let schema = SchemaLoader::new(file.path()).load().unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.config("nick").unwrap().slug_format);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(".json", r#"{"iban": "iban"}"#);
        let schema = SchemaLoader::new(file.path()).load().unwrap();
        let config = schema.config("iban").unwrap();
        assert_eq!(config.display_prefix.as_deref(), Some("TR"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = SchemaLoader::new(&path).load().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_parse_error_has_context() {
        let file = write_temp(".yaml", "phone: not-a-preset\n");
        let err = SchemaLoader::new(file.path()).load().unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_default_path() {
        let loader = SchemaLoader::new(SchemaLoader::DEFAULT_PATH);
        assert_eq!(loader.path(), Path::new("fieldmask.yaml"));
    }
}
