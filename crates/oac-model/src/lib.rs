//! Document object model for OAC.
//!
//! This crate owns everything about the *shape* of an API description
//! document: the serde object model (an OpenAPI v3 subset), the
//! [`RefOr`] reference union that tags indirection at parse time, local
//! `$ref` pointer parsing, and JSON/YAML loading. It knows nothing about
//! diffing; the IR and diff crates consume these types read-only.
//!
//! # Key Types
//!
//! - [`Document`] / [`PathItem`] / [`Operation`] -- The parsed document tree
//! - [`RefOr`] -- Concrete-or-Reference union, discriminated at parse time
//! - [`HttpMethod`] -- Fixed method enum in canonical iteration order
//! - [`ModelError`] -- Fatal loading-boundary failures

pub mod document;
pub mod error;
pub mod load;
pub mod method;
pub mod reference;

pub use document::{
    AdditionalProperties, Components, Document, Example, ExternalDocs, Info, MediaType, Operation,
    Parameter, ParameterLocation, PathItem, RequestBody, Response, Schema,
};
pub use error::{ModelError, ModelResult};
pub use method::HttpMethod;
pub use reference::{local_name, parse_local_reference, ComponentKind, RefOr};
