//! Reference unions and `$ref` pointer parsing.
//!
//! An OpenAPI value position that admits indirection is modeled as
//! [`RefOr<T>`]: either a concrete object or a named reference. The variant
//! is decided once, at parse time, by serde's untagged discrimination on the
//! presence of the `$ref` key; downstream code matches on the variant and
//! never re-inspects object shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value that is either a concrete object or a reference to a shared
/// definition elsewhere in the same document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` pointer, e.g. `#/components/schemas/Pet`.
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// A concrete, inline object.
    Item(T),
}

impl<T> RefOr<T> {
    /// Wrap a concrete value.
    pub fn item(value: T) -> Self {
        RefOr::Item(value)
    }

    /// Build a reference to a named component of the given kind.
    pub fn reference(kind: ComponentKind, name: &str) -> Self {
        RefOr::Reference {
            reference: format!("#/components/{}/{name}", kind.segment()),
        }
    }

    /// The concrete value, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Item(item) => Some(item),
            RefOr::Reference { .. } => None,
        }
    }

    /// The raw `$ref` string, if this is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            RefOr::Reference { reference } => Some(reference),
            RefOr::Item(_) => None,
        }
    }
}

/// The component sections a local reference can point into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schema,
    Parameter,
    Response,
}

impl ComponentKind {
    /// The path segment under `#/components/` for this kind.
    pub fn segment(&self) -> &'static str {
        match self {
            ComponentKind::Schema => "schemas",
            ComponentKind::Parameter => "parameters",
            ComponentKind::Response => "responses",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Parse a local component pointer into its kind and bare name.
///
/// Only `#/components/{schemas,parameters,responses}/{name}` pointers are
/// resolvable; external files, URLs, and other document locations return
/// `None` and are treated as unresolvable by callers.
pub fn parse_local_reference(pointer: &str) -> Option<(ComponentKind, &str)> {
    let rest = pointer.strip_prefix("#/components/")?;
    let (segment, name) = rest.split_once('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    let kind = match segment {
        "schemas" => ComponentKind::Schema,
        "parameters" => ComponentKind::Parameter,
        "responses" => ComponentKind::Response,
        _ => return None,
    };
    Some((kind, name))
}

/// The bare component name of a local pointer, when it points into the
/// expected section.
pub fn local_name(pointer: &str, expected: ComponentKind) -> Option<&str> {
    match parse_local_reference(pointer) {
        Some((kind, name)) if kind == expected => Some(name),
        _ => None,
    }
}
