//! Shared-component usage search.
//!
//! A shared parameter or schema is "used" by an operation when the
//! operation reaches it through any reference chain: parameter lists,
//! request body content, response content, or the schema graph itself
//! (array items, properties, composition keywords). The walk memoizes
//! named schemas per query so cyclic reference graphs terminate.

use std::collections::{HashMap, HashSet};

use oac_model::{
    local_name, AdditionalProperties, ComponentKind, Document, MediaType, Operation, Parameter,
    PathItem, RefOr, Schema,
};

use crate::resolve::{resolve_parameter, resolve_response};

/// Walk state of a named schema during one reachability query.
enum SearchState {
    /// On the current walk stack; re-entering contributes no hit, which
    /// cuts the cycle without affecting reachability elsewhere.
    InProgress,
    /// Fully explored.
    Resolved(bool),
}

/// Whether an operation uses the shared parameter `target`.
///
/// Both operation-level and path-level parameter entries count. Only
/// reference chains count: an inline parameter that merely shares the
/// component's name is not a use of it.
pub fn operation_references_parameter(
    doc: &Document,
    path_item: &PathItem,
    operation: &Operation,
    target: &str,
) -> bool {
    operation
        .parameters
        .iter()
        .chain(path_item.parameters.iter())
        .any(|entry| parameter_chain_hits(doc, entry, target))
}

fn parameter_chain_hits(doc: &Document, entry: &RefOr<Parameter>, target: &str) -> bool {
    let mut current = entry;
    let mut seen: HashSet<&str> = HashSet::new();
    loop {
        match current {
            RefOr::Item(_) => return false,
            RefOr::Reference { reference } => {
                let Some(name) = local_name(reference, ComponentKind::Parameter) else {
                    return false;
                };
                if name == target {
                    return true;
                }
                if !seen.insert(name) {
                    return false;
                }
                match doc.components.parameter(name) {
                    Some(next) => current = next,
                    None => return false,
                }
            }
        }
    }
}

/// Whether an operation reaches the shared schema `target` anywhere in
/// its surface: parameter schemas, request body content, or response
/// content, following nested schema references transitively.
pub fn operation_references_schema(
    doc: &Document,
    path_item: &PathItem,
    operation: &Operation,
    target: &str,
) -> bool {
    let mut memo: HashMap<String, SearchState> = HashMap::new();

    for entry in operation
        .parameters
        .iter()
        .chain(path_item.parameters.iter())
    {
        if let Some(param) = resolve_parameter(doc, entry) {
            if parameter_reaches(doc, param, target, &mut memo) {
                return true;
            }
        }
    }

    // Request bodies have no shared component section in the model, so a
    // referenced body cannot be chased; only inline bodies are searched.
    if let Some(RefOr::Item(body)) = &operation.request_body {
        if content_reaches(doc, &body.content, target, &mut memo) {
            return true;
        }
    }

    for entry in operation.responses.values() {
        if let Some(response) = resolve_response(doc, entry) {
            if content_reaches(doc, &response.content, target, &mut memo) {
                return true;
            }
        }
    }

    false
}

fn parameter_reaches(
    doc: &Document,
    param: &Parameter,
    target: &str,
    memo: &mut HashMap<String, SearchState>,
) -> bool {
    if let Some(schema) = &param.schema {
        if schema_ref_reaches(doc, schema, target, memo) {
            return true;
        }
    }
    if let Some(content) = &param.content {
        if content_reaches(doc, content, target, memo) {
            return true;
        }
    }
    false
}

fn content_reaches(
    doc: &Document,
    content: &std::collections::BTreeMap<String, MediaType>,
    target: &str,
    memo: &mut HashMap<String, SearchState>,
) -> bool {
    for media in content.values() {
        if let Some(schema) = &media.schema {
            if schema_ref_reaches(doc, schema, target, memo) {
                return true;
            }
        }
    }
    false
}

fn schema_ref_reaches(
    doc: &Document,
    value: &RefOr<Schema>,
    target: &str,
    memo: &mut HashMap<String, SearchState>,
) -> bool {
    match value {
        RefOr::Item(schema) => schema_reaches(doc, schema, target, memo),
        RefOr::Reference { reference } => {
            let Some(name) = local_name(reference, ComponentKind::Schema) else {
                return false;
            };
            if name == target {
                return true;
            }
            match memo.get(name) {
                Some(SearchState::Resolved(hit)) => return *hit,
                Some(SearchState::InProgress) => return false,
                None => {}
            }
            memo.insert(name.to_string(), SearchState::InProgress);
            let hit = match doc.components.schema(name) {
                Some(next) => schema_ref_reaches(doc, next, target, memo),
                None => false,
            };
            memo.insert(name.to_string(), SearchState::Resolved(hit));
            hit
        }
    }
}

fn schema_reaches(
    doc: &Document,
    schema: &Schema,
    target: &str,
    memo: &mut HashMap<String, SearchState>,
) -> bool {
    if let Some(items) = &schema.items {
        if schema_ref_reaches(doc, items, target, memo) {
            return true;
        }
    }
    for value in schema.properties.values() {
        if schema_ref_reaches(doc, value, target, memo) {
            return true;
        }
    }
    if let Some(AdditionalProperties::Schema(value)) = &schema.additional_properties {
        if schema_ref_reaches(doc, value, target, memo) {
            return true;
        }
    }
    for value in schema
        .all_of
        .iter()
        .chain(schema.one_of.iter())
        .chain(schema.any_of.iter())
    {
        if schema_ref_reaches(doc, value, target, memo) {
            return true;
        }
    }
    if let Some(not) = &schema.not {
        if schema_ref_reaches(doc, not, target, memo) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use oac_model::HttpMethod;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    fn get_op<'a>(doc: &'a Document, path: &str) -> (&'a PathItem, &'a Operation) {
        let item = &doc.paths[path];
        (item, item.operation(HttpMethod::Get).unwrap())
    }

    #[test]
    fn reference_counts_inline_does_not() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/by-ref": {
                    "get": {
                        "parameters": [{ "$ref": "#/components/parameters/limit" }],
                        "responses": {}
                    }
                },
                "/inline": {
                    "get": {
                        "parameters": [{ "name": "limit", "in": "query" }],
                        "responses": {}
                    }
                }
            },
            "components": {
                "parameters": {
                    "limit": { "name": "limit", "in": "query" }
                }
            }
        }));

        let (item, op) = get_op(&d, "/by-ref");
        assert!(operation_references_parameter(&d, item, op, "limit"));

        let (item, op) = get_op(&d, "/inline");
        assert!(!operation_references_parameter(&d, item, op, "limit"));
    }

    #[test]
    fn parameter_alias_chain_counts_every_link() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{ "$ref": "#/components/parameters/alias" }],
                        "responses": {}
                    }
                }
            },
            "components": {
                "parameters": {
                    "alias": { "$ref": "#/components/parameters/limit" },
                    "limit": { "name": "limit", "in": "query" }
                }
            }
        }));
        let (item, op) = get_op(&d, "/pets");
        assert!(operation_references_parameter(&d, item, op, "alias"));
        assert!(operation_references_parameter(&d, item, op, "limit"));
        assert!(!operation_references_parameter(&d, item, op, "offset"));
    }

    #[test]
    fn path_level_parameters_count() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets/{id}": {
                    "parameters": [{ "$ref": "#/components/parameters/petId" }],
                    "get": { "responses": {} }
                }
            },
            "components": {
                "parameters": {
                    "petId": { "name": "id", "in": "path", "required": true }
                }
            }
        }));
        let (item, op) = get_op(&d, "/pets/{id}");
        assert!(operation_references_parameter(&d, item, op, "petId"));
    }

    #[test]
    fn schema_reached_through_response_content() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Pets" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pets": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Pet" }
                    },
                    "Pet": { "type": "object" },
                    "Order": { "type": "object" }
                }
            }
        }));
        let (item, op) = get_op(&d, "/pets");
        assert!(operation_references_schema(&d, item, op, "Pets"));
        // Transitive: Pets -> items -> Pet.
        assert!(operation_references_schema(&d, item, op, "Pet"));
        assert!(!operation_references_schema(&d, item, op, "Order"));
    }

    #[test]
    fn schema_reached_through_parameter_schema() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/search": {
                    "get": {
                        "parameters": [{
                            "name": "filter",
                            "in": "query",
                            "schema": { "$ref": "#/components/schemas/Filter" }
                        }],
                        "responses": {}
                    }
                }
            },
            "components": {
                "schemas": { "Filter": { "type": "object" } }
            }
        }));
        let (item, op) = get_op(&d, "/search");
        assert!(operation_references_schema(&d, item, op, "Filter"));
    }

    #[test]
    fn inline_request_body_is_searched_referenced_body_is_not() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewPet" }
                                }
                            }
                        },
                        "responses": {}
                    }
                },
                "/orders": {
                    "post": {
                        "requestBody": { "$ref": "#/components/requestBodies/Order" },
                        "responses": {}
                    }
                }
            },
            "components": {
                "schemas": { "NewPet": { "type": "object" } }
            }
        }));

        let item = &d.paths["/pets"];
        let op = item.operation(HttpMethod::Post).unwrap();
        assert!(operation_references_schema(&d, item, op, "NewPet"));

        let item = &d.paths["/orders"];
        let op = item.operation(HttpMethod::Post).unwrap();
        assert!(!operation_references_schema(&d, item, op, "NewPet"));
    }

    #[test]
    fn cyclic_schema_graph_terminates_and_finds_target() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/nodes": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Node" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "parent": { "$ref": "#/components/schemas/Node" },
                            "label": { "$ref": "#/components/schemas/Label" }
                        }
                    },
                    "Label": { "type": "string" },
                    "Unrelated": { "type": "string" }
                }
            }
        }));
        let (item, op) = get_op(&d, "/nodes");
        assert!(operation_references_schema(&d, item, op, "Node"));
        assert!(operation_references_schema(&d, item, op, "Label"));
        assert!(!operation_references_schema(&d, item, op, "Unrelated"));
    }

    #[test]
    fn composition_keywords_are_searched() {
        let d = doc(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/mix": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "allOf": [
                                                { "$ref": "#/components/schemas/Base" },
                                                { "type": "object" }
                                            ]
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": { "Base": { "type": "object" } }
            }
        }));
        let (item, op) = get_op(&d, "/mix");
        assert!(operation_references_schema(&d, item, op, "Base"));
    }
}
