//! Document loading: JSON and YAML surfaces.
//!
//! The dispatch is by file extension; files with an unrecognized extension
//! are tried as JSON first and YAML second. Failures here are fatal and
//! labeled, so downstream stages only ever see a well-formed [`Document`].

use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::{ModelError, ModelResult};

impl Document {
    /// Parse a document from a JSON string.
    pub fn from_json_str(content: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml_str(content: &str) -> ModelResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a document from a file, choosing the surface syntax by
    /// extension (`.json`, `.yaml`, `.yml`); anything else is tried as
    /// JSON, then YAML.
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => {
                let json_err = match serde_json::from_str(&content) {
                    Ok(doc) => return Ok(doc),
                    Err(e) => e,
                };
                match serde_yaml::from_str(&content) {
                    Ok(doc) => Ok(doc),
                    Err(yaml_err) => Err(ModelError::UnknownFormat {
                        path: path.to_path_buf(),
                        json: json_err,
                        yaml: yaml_err,
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JSON_DOC: &str = r#"{
        "info": { "title": "Minimal", "version": "0.1.0" },
        "paths": { "/things": { "get": { "responses": {} } } }
    }"#;

    const YAML_DOC: &str = "\
info:
  title: Minimal
  version: 0.1.0
paths:
  /things:
    get:
      responses: {}
";

    #[test]
    fn json_and_yaml_surfaces_agree() {
        let a = Document::from_json_str(JSON_DOC).unwrap();
        let b = Document::from_yaml_str(YAML_DOC).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_json_is_labeled() {
        let err = Document::from_json_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn missing_info_is_a_parse_failure() {
        let err = Document::from_json_str(r#"{ "paths": {} }"#).unwrap_err();
        assert!(matches!(err, crate::error::ModelError::Json(_)));
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("spec.json");
        fs::write(&json_path, JSON_DOC).unwrap();
        let doc = Document::from_path(&json_path).unwrap();
        assert_eq!(doc.info.title, "Minimal");

        let yaml_path = dir.path().join("spec.yaml");
        fs::write(&yaml_path, YAML_DOC).unwrap();
        let doc = Document::from_path(&yaml_path).unwrap();
        assert_eq!(doc.info.version, "0.1.0");
    }

    #[test]
    fn unknown_extension_sniffs_both() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.api");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(YAML_DOC.as_bytes()).unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.info.title, "Minimal");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Document::from_path(Path::new("/nonexistent/spec.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/spec.json"));
    }
}
