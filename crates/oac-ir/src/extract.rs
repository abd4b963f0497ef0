//! Document walk that produces the flat IR snapshot.
//!
//! Extraction is pure over the input document. Unresolvable references
//! never abort a run: the referencing entity is dropped with a warning
//! and extraction continues, so a partially broken document still yields
//! a diffable (if smaller) IR.

use std::time::Instant;

use tracing::{debug, warn};

use oac_model::{Document, Operation, Parameter, RefOr, Response};

use crate::occurrence::{operation_references_parameter, operation_references_schema};
use crate::render;
use crate::resolve::{resolve_parameter, resolve_response, resolve_schema};
use crate::types::{
    DocumentIr, NamedParameterIr, NamedSchemaIr, OperationIr, OperationKey, ParameterIr,
    ResponseIr,
};

/// Build the IR for a parsed document.
///
/// The three passes (operations, shared parameters, shared schemas) are
/// timed individually for diagnostics.
pub fn extract(doc: &Document) -> DocumentIr {
    let started = Instant::now();
    let operations = extract_operations(doc);
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        count = operations.len(),
        "extracted operations"
    );

    let started = Instant::now();
    let parameters = extract_shared_parameters(doc);
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        count = parameters.len(),
        "extracted shared parameters"
    );

    let started = Instant::now();
    let schemas = extract_shared_schemas(doc);
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        count = schemas.len(),
        "extracted shared schemas"
    );

    DocumentIr {
        title: doc.info.title.clone(),
        version: doc.info.version.clone(),
        operations,
        parameters,
        schemas,
    }
}

fn extract_operations(doc: &Document) -> Vec<OperationIr> {
    let mut operations = Vec::new();
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            let key = OperationKey::new(path, method);
            operations.push(extract_operation(doc, key, op));
        }
    }
    operations
}

fn extract_operation(doc: &Document, key: OperationKey, op: &Operation) -> OperationIr {
    let parameters = op
        .parameters
        .iter()
        .filter_map(|entry| extract_parameter(doc, &key, entry))
        .collect();
    let responses = op
        .responses
        .iter()
        .filter_map(|(code, entry)| extract_response(doc, &key, code, entry))
        .collect();
    OperationIr {
        description: render::operation_description(op),
        deprecated: op.deprecated,
        parameters,
        responses,
        key,
    }
}

fn extract_parameter(
    doc: &Document,
    key: &OperationKey,
    entry: &RefOr<Parameter>,
) -> Option<ParameterIr> {
    match resolve_parameter(doc, entry) {
        Some(param) => Some(ParameterIr {
            name: param.name.clone(),
            location: param.location,
            type_label: render::parameter_type_label(param),
            description: param.description.clone(),
            deprecated: param.deprecated,
            required: param.required,
            examples: render::parameter_examples(param),
        }),
        None => {
            warn!(
                operation = %key,
                reference = entry.as_reference().unwrap_or("<inline>"),
                "unresolvable parameter reference; dropping"
            );
            None
        }
    }
}

fn extract_response(
    doc: &Document,
    key: &OperationKey,
    code: &str,
    entry: &RefOr<Response>,
) -> Option<ResponseIr> {
    match resolve_response(doc, entry) {
        Some(response) => Some(ResponseIr {
            code: code.to_string(),
            type_label: render::response_type_label(response),
            description: response.description.clone(),
            examples: render::response_examples(response),
        }),
        None => {
            warn!(
                operation = %key,
                code,
                reference = entry.as_reference().unwrap_or("<inline>"),
                "unresolvable response reference; dropping"
            );
            None
        }
    }
}

fn extract_shared_parameters(doc: &Document) -> Vec<NamedParameterIr> {
    let mut parameters = Vec::new();
    for (name, entry) in &doc.components.parameters {
        let Some(param) = resolve_parameter(doc, entry) else {
            warn!(parameter = %name, "unresolvable shared parameter; dropping");
            continue;
        };
        parameters.push(NamedParameterIr {
            name: name.clone(),
            type_label: render::parameter_type_label(param),
            description: param.description.clone(),
            examples: render::parameter_examples(param),
            occurrences: parameter_occurrences(doc, name),
        });
    }
    parameters
}

fn extract_shared_schemas(doc: &Document) -> Vec<NamedSchemaIr> {
    let mut schemas = Vec::new();
    for (name, entry) in &doc.components.schemas {
        let Some(schema) = resolve_schema(doc, entry) else {
            warn!(schema = %name, "unresolvable shared schema; dropping");
            continue;
        };
        schemas.push(NamedSchemaIr {
            name: name.clone(),
            description: schema.description.clone(),
            examples: schema.example.as_ref().map(render::compact_value),
            occurrences: schema_occurrences(doc, name),
        });
    }
    schemas
}

fn parameter_occurrences(doc: &Document, target: &str) -> Vec<OperationKey> {
    let mut keys = Vec::new();
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            if operation_references_parameter(doc, item, op, target) {
                keys.push(OperationKey::new(path, method));
            }
        }
    }
    keys
}

fn schema_occurrences(doc: &Document, target: &str) -> Vec<OperationKey> {
    let mut keys = Vec::new();
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            if operation_references_schema(doc, item, op, target) {
                keys.push(OperationKey::new(path, method));
            }
        }
    }
    keys
}
