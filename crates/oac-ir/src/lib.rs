//! Intermediate representation of an API description document.
//!
//! Flattens a parsed [`oac_model::Document`] into denormalized snapshots:
//! operations with resolved parameters and responses, plus shared
//! parameters and schemas with their reverse occurrence sets. Reference
//! chains are resolved during extraction so downstream diffing compares
//! plain strings and flags, never raw `$ref` pointers.
//!
//! # Key Types
//!
//! - [`DocumentIr`] / [`OperationIr`] -- Per-document snapshot and its operations
//! - [`ParameterIr`] / [`ResponseIr`] -- Operation-scoped entities
//! - [`NamedParameterIr`] / [`NamedSchemaIr`] -- Shared entities with occurrences
//! - [`extract`] -- The document walk that builds it all

pub mod extract;
pub mod occurrence;
pub mod render;
pub mod resolve;
pub mod types;

pub use extract::extract;
pub use occurrence::{operation_references_parameter, operation_references_schema};
pub use render::{
    content_type_label, operation_description, parameter_examples, parameter_type_label,
    response_examples, response_type_label, schema_type_label, UNKNOWN_TYPE,
};
pub use resolve::{resolve, resolve_parameter, resolve_response, resolve_schema};
pub use types::{
    DocumentIr, NamedParameterIr, NamedSchemaIr, OperationIr, OperationKey, ParameterIr,
    ResponseIr,
};
