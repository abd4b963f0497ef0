//! Error types for document loading.

use std::path::PathBuf;

/// Errors raised at the document loading boundary.
///
/// These are fatal: the diff pipeline never sees a document that failed to
/// load or parse.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The document file could not be read.
    #[error("failed to read document {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON, or does not match the object model.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML, or does not match the object model.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parses as neither JSON nor YAML.
    #[error("document {path:?} is neither valid JSON ({json}) nor valid YAML ({yaml})")]
    UnknownFormat {
        path: PathBuf,
        json: serde_json::Error,
        yaml: serde_yaml::Error,
    },
}

/// Convenience alias for model results.
pub type ModelResult<T> = Result<T, ModelError>;
