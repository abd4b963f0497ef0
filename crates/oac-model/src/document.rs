//! Serde object model for the OpenAPI v3 subset OAC understands.
//!
//! The model is deliberately partial: only the structural facts the diff
//! pipeline consumes (operations, parameters, responses, schema shapes,
//! deprecation, descriptions) are represented, and unknown keys are skipped
//! silently. Every map is a [`BTreeMap`] so iteration order is lexicographic
//! and stable run-to-run; downstream output ordering depends on this.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::method::HttpMethod;
use crate::reference::RefOr;

/// A parsed API description document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub info: Info,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,
}

/// The `info` block: the two fields the changelog cares about.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
}

/// One path entry: up to one operation per HTTP method, plus parameters
/// that apply to every operation at this path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

impl PathItem {
    /// The operation for a method, if declared.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Declared operations in canonical method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .iter()
            .filter_map(|m| self.operation(*m).map(|op| (*m, op)))
    }
}

/// A single operation (one method on one path).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<Response>>,
}

/// An `externalDocs` link.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// Where a parameter is carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    FormData,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter, either inline on an operation/path or shared under
/// `components.parameters`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub deprecated: bool,
    pub schema: Option<RefOr<Schema>>,
    pub content: Option<BTreeMap<String, MediaType>>,
    pub example: Option<Value>,
    #[serde(default)]
    pub examples: BTreeMap<String, RefOr<Example>>,
}

/// A schema shape. Recursive positions box the nested reference union.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    pub items: Option<Box<RefOr<Schema>>>,
    #[serde(default)]
    pub properties: BTreeMap<String, RefOr<Schema>>,
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(default)]
    pub all_of: Vec<RefOr<Schema>>,
    #[serde(default)]
    pub one_of: Vec<RefOr<Schema>>,
    #[serde(default)]
    pub any_of: Vec<RefOr<Schema>>,
    pub not: Option<Box<RefOr<Schema>>>,
    #[serde(default)]
    pub required: Vec<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    pub example: Option<Value>,
}

/// `additionalProperties` is either a blanket boolean or a value schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<RefOr<Schema>>),
}

/// A request body carrying per-media-type schemas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// One media-type entry of a `content` map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Option<RefOr<Schema>>,
    pub example: Option<Value>,
    #[serde(default)]
    pub examples: BTreeMap<String, RefOr<Example>>,
}

/// A response, keyed in an operation by its status code string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// A named example.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
}

/// The shared definitions of a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, RefOr<Schema>>,
    #[serde(default)]
    pub parameters: BTreeMap<String, RefOr<Parameter>>,
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<Response>>,
}

impl Components {
    pub fn schema(&self, name: &str) -> Option<&RefOr<Schema>> {
        self.schemas.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&RefOr<Parameter>> {
        self.parameters.get(name)
    }

    pub fn response(&self, name: &str) -> Option<&RefOr<Response>> {
        self.responses.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pets_doc() -> Document {
        serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "Pet Store", "version": "1.0.0" },
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "List pets",
                        "parameters": [
                            {
                                "name": "limit",
                                "in": "query",
                                "schema": { "type": "integer" }
                            },
                            { "$ref": "#/components/parameters/offset" }
                        ],
                        "responses": {
                            "200": {
                                "description": "A paged list",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Pets" }
                                    }
                                }
                            }
                        }
                    },
                    "x-extension": { "ignored": true }
                }
            },
            "components": {
                "parameters": {
                    "offset": {
                        "name": "offset",
                        "in": "query",
                        "schema": { "type": "integer" }
                    }
                },
                "schemas": {
                    "Pets": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Pet" }
                    },
                    "Pet": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn parse_basic_document() {
        let doc = pets_doc();
        assert_eq!(doc.info.title, "Pet Store");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(doc.paths.len(), 1);

        let item = &doc.paths["/pets"];
        let get = item.operation(HttpMethod::Get).unwrap();
        assert_eq!(get.summary.as_deref(), Some("List pets"));
        assert_eq!(get.parameters.len(), 2);
        assert!(item.operation(HttpMethod::Post).is_none());
    }

    #[test]
    fn unknown_keys_are_skipped() {
        // `openapi` and `x-extension` have no model fields; parsing succeeds.
        let doc = pets_doc();
        assert_eq!(doc.paths["/pets"].operations().count(), 1);
    }

    #[test]
    fn inline_vs_reference_parameters() {
        let doc = pets_doc();
        let get = doc.paths["/pets"].operation(HttpMethod::Get).unwrap();
        assert!(get.parameters[0].as_item().is_some());
        assert_eq!(
            get.parameters[1].as_reference(),
            Some("#/components/parameters/offset")
        );
    }

    #[test]
    fn component_lookups() {
        let doc = pets_doc();
        assert!(doc.components.parameter("offset").is_some());
        assert!(doc.components.schema("Pet").is_some());
        assert!(doc.components.schema("Missing").is_none());
        assert!(doc.components.response("200").is_none());
    }

    #[test]
    fn parameter_location_parsing() {
        let p: Parameter = serde_json::from_value(json!({
            "name": "payload",
            "in": "formData",
            "required": true
        }))
        .unwrap();
        assert_eq!(p.location, ParameterLocation::FormData);
        assert!(p.required);
        assert!(!p.deprecated);
        assert_eq!(p.location.to_string(), "formData");
    }

    #[test]
    fn additional_properties_accepts_bool_and_schema() {
        let a: Schema = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": false
        }))
        .unwrap();
        assert_eq!(a.additional_properties, Some(AdditionalProperties::Allowed(false)));

        let b: Schema = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        }))
        .unwrap();
        assert!(matches!(
            b.additional_properties,
            Some(AdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn operations_iterate_in_method_order() {
        let item: PathItem = serde_json::from_value(json!({
            "delete": { "responses": {} },
            "get": { "responses": {} },
            "put": { "responses": {} }
        }))
        .unwrap();
        let methods: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete]
        );
    }

    #[test]
    fn paths_iterate_lexicographically() {
        let doc: Document = serde_json::from_value(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/zebras": {},
                "/apes": {},
                "/pets": {}
            }
        }))
        .unwrap();
        let order: Vec<&String> = doc.paths.keys().collect();
        assert_eq!(order, vec!["/apes", "/pets", "/zebras"]);
    }
}
