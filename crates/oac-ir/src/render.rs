//! Rendering document fragments into the short strings the IR carries.
//!
//! Type labels are display strings, not a type system: a reference renders
//! as its bare component name without resolution, arrays render as
//! `<item>[]`, and anything with no usable type information renders as the
//! `???` placeholder. Content maps render one bullet per media type.

use std::collections::BTreeMap;

use oac_model::{
    local_name, ComponentKind, MediaType, Operation, Parameter, RefOr, Response, Schema,
};
use serde_json::Value;

/// Placeholder label when no type information is present.
pub const UNKNOWN_TYPE: &str = "???";

/// Short type label for a schema position.
pub fn schema_type_label(value: &RefOr<Schema>) -> String {
    match value {
        RefOr::Reference { reference } => match local_name(reference, ComponentKind::Schema) {
            Some(name) => name.to_string(),
            None => reference.clone(),
        },
        RefOr::Item(schema) => {
            if schema.schema_type.as_deref() == Some("array") {
                let item = match &schema.items {
                    Some(items) => schema_type_label(items),
                    None => UNKNOWN_TYPE.to_string(),
                };
                format!("{item}[]")
            } else {
                match &schema.schema_type {
                    Some(declared) => declared.clone(),
                    None => UNKNOWN_TYPE.to_string(),
                }
            }
        }
    }
}

/// Bullet-list label for a per-media-type content map, one line per entry
/// in lexicographic media-type order.
pub fn content_type_label(content: &BTreeMap<String, MediaType>) -> String {
    content
        .iter()
        .map(|(media, entry)| {
            let label = match &entry.schema {
                Some(schema) => schema_type_label(schema),
                None => UNKNOWN_TYPE.to_string(),
            };
            format!("- {media}: {label}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Type label for a parameter: content breakdown when a content map is
/// carried, otherwise the schema label, otherwise the placeholder.
pub fn parameter_type_label(param: &Parameter) -> String {
    if let Some(content) = &param.content {
        if !content.is_empty() {
            return content_type_label(content);
        }
    }
    match &param.schema {
        Some(schema) => schema_type_label(schema),
        None => UNKNOWN_TYPE.to_string(),
    }
}

/// Type label for a response body.
pub fn response_type_label(response: &Response) -> String {
    if response.content.is_empty() {
        UNKNOWN_TYPE.to_string()
    } else {
        content_type_label(&response.content)
    }
}

/// Combined description for an operation: summary, description, and an
/// external-docs line, one paragraph each. `None` when nothing is present.
pub fn operation_description(op: &Operation) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    if let Some(summary) = &op.summary {
        if !summary.is_empty() {
            paragraphs.push(summary.clone());
        }
    }
    if let Some(description) = &op.description {
        if !description.is_empty() {
            paragraphs.push(description.clone());
        }
    }
    if let Some(docs) = &op.external_docs {
        if !docs.url.is_empty() {
            let line = match docs.description.as_deref() {
                Some(text) if !text.is_empty() => format!("{text}: {}", docs.url),
                _ => format!("See {}", docs.url),
            };
            paragraphs.push(line);
        }
    }
    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

/// Rendered examples for a parameter. A direct `example` value wins, then
/// the named `examples` map, then media-type examples from a content map.
pub fn parameter_examples(param: &Parameter) -> Option<String> {
    if let Some(value) = &param.example {
        return Some(value.to_string());
    }
    let named = named_example_lines(&param.examples);
    if !named.is_empty() {
        return Some(named.join("\n"));
    }
    param.content.as_ref().and_then(|c| content_examples(c))
}

/// Rendered examples for a response body.
pub fn response_examples(response: &Response) -> Option<String> {
    content_examples(&response.content)
}

fn content_examples(content: &BTreeMap<String, MediaType>) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    for (media, entry) in content {
        if let Some(value) = &entry.example {
            lines.push(format!("{media}: {value}"));
        } else {
            for (name, example) in &entry.examples {
                if let RefOr::Item(example) = example {
                    if let Some(value) = &example.value {
                        lines.push(format!("{media} {name}: {value}"));
                    }
                }
            }
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn named_example_lines(examples: &BTreeMap<String, RefOr<oac_model::Example>>) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for (name, example) in examples {
        if let RefOr::Item(example) = example {
            if let Some(value) = &example.value {
                lines.push(format!("{name}: {value}"));
            }
        }
    }
    lines
}

/// Compact rendering of a raw JSON value, shared by callers that surface
/// example payloads.
pub fn compact_value(value: &Value) -> String {
    value.to_string()
}
