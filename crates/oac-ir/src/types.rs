//! The intermediate representation: flat, reference-resolved snapshots.
//!
//! An IR is derived from one document by [`extract`](crate::extract::extract)
//! and is immutable afterwards. Lookups are linear scans; the lists are
//! small and their order is the order every downstream consumer iterates in.

use std::fmt;

use oac_model::{HttpMethod, ParameterLocation};
use serde::{Deserialize, Serialize};

/// Identity of one operation: its path and method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationKey {
    pub path: String,
    pub method: HttpMethod,
}

impl OperationKey {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// The reference-resolved snapshot of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentIr {
    pub title: String,
    pub version: String,
    pub operations: Vec<OperationIr>,
    pub parameters: Vec<NamedParameterIr>,
    pub schemas: Vec<NamedSchemaIr>,
}

impl DocumentIr {
    /// Find an operation by its key.
    pub fn operation(&self, key: &OperationKey) -> Option<&OperationIr> {
        self.operations.iter().find(|op| op.key == *key)
    }

    /// Find a shared parameter by name.
    pub fn shared_parameter(&self, name: &str) -> Option<&NamedParameterIr> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Find a shared schema by name.
    pub fn shared_schema(&self, name: &str) -> Option<&NamedSchemaIr> {
        self.schemas.iter().find(|s| s.name == name)
    }
}

/// One operation with its resolved parameters and responses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationIr {
    pub key: OperationKey,
    /// Summary, description, and external-docs link, joined as paragraphs.
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<ParameterIr>,
    pub responses: Vec<ResponseIr>,
}

impl OperationIr {
    /// Find a parameter by its identity (name + location).
    pub fn parameter(&self, name: &str, location: ParameterLocation) -> Option<&ParameterIr> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.location == location)
    }

    /// Find a response by status code key.
    pub fn response(&self, code: &str) -> Option<&ResponseIr> {
        self.responses.iter().find(|r| r.code == code)
    }
}

/// A parameter scoped to one operation, with its reference chain resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterIr {
    pub name: String,
    pub location: ParameterLocation,
    /// Rendered shape: a type name, `T[]`, a media-type breakdown, or `???`.
    pub type_label: String,
    pub description: Option<String>,
    pub deprecated: bool,
    pub required: bool,
    pub examples: Option<String>,
}

/// A response scoped to one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseIr {
    /// Status code key, e.g. `"200"` or `"default"`.
    pub code: String,
    pub type_label: String,
    pub description: Option<String>,
    pub examples: Option<String>,
}

/// A shared parameter under `components.parameters`, with the operations
/// that transitively reference it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedParameterIr {
    pub name: String,
    pub type_label: String,
    pub description: Option<String>,
    pub examples: Option<String>,
    pub occurrences: Vec<OperationKey>,
}

/// A shared schema under `components.schemas`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedSchemaIr {
    pub name: String,
    pub description: Option<String>,
    pub examples: Option<String>,
    pub occurrences: Vec<OperationKey>,
}
