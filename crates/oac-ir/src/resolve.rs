//! Reference chain resolution.
//!
//! A [`RefOr`] value resolves to its concrete object by following `$ref`
//! links to a fixed point. Resolution fails soft: a dangling name, a
//! foreign or wrong-kind pointer, or a cyclic chain all yield `None`, and
//! callers drop the referencing entity with a warning rather than abort.

use std::collections::HashSet;

use oac_model::{
    local_name, ComponentKind, Document, Parameter, RefOr, Response, Schema,
};

/// Follow a reference chain until a concrete value is found.
///
/// `lookup` maps a bare component name to the next link. The visited-name
/// set bounds self-referential chains.
pub fn resolve<'a, T>(
    value: &'a RefOr<T>,
    kind: ComponentKind,
    lookup: impl Fn(&str) -> Option<&'a RefOr<T>>,
) -> Option<&'a T> {
    let mut current = value;
    let mut seen: HashSet<&'a str> = HashSet::new();
    loop {
        match current {
            RefOr::Item(item) => return Some(item),
            RefOr::Reference { reference } => {
                let name = local_name(reference, kind)?;
                if !seen.insert(name) {
                    // Cycle: the chain never reaches a concrete object.
                    return None;
                }
                current = lookup(name)?;
            }
        }
    }
}

/// Resolve a parameter through `components.parameters`.
pub fn resolve_parameter<'a>(
    doc: &'a Document,
    value: &'a RefOr<Parameter>,
) -> Option<&'a Parameter> {
    resolve(value, ComponentKind::Parameter, |name| {
        doc.components.parameter(name)
    })
}

/// Resolve a schema through `components.schemas`.
pub fn resolve_schema<'a>(doc: &'a Document, value: &'a RefOr<Schema>) -> Option<&'a Schema> {
    resolve(value, ComponentKind::Schema, |name| {
        doc.components.schema(name)
    })
}

/// Resolve a response through `components.responses`.
pub fn resolve_response<'a>(
    doc: &'a Document,
    value: &'a RefOr<Response>,
) -> Option<&'a Response> {
    resolve(value, ComponentKind::Response, |name| {
        doc.components.response(name)
    })
}
