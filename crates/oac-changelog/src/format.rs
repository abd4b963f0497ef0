//! Changelog text rendering.
//!
//! Renders a classified change set as ordered text: the breaking section
//! first, then the non-breaking section, a blank line between them, and a
//! single "no changes" line when both are empty. Within a section changes
//! group by owning operation in first-appearance order, shared-entity
//! changes last, and each group is sorted by kind tag. Detail blocks are
//! best-effort: a lookup that finds nothing leaves the headline alone.

use oac_diff::{Change, ChangeSet};
use oac_ir::{DocumentIr, OperationKey, ParameterIr, ResponseIr};
use oac_model::ParameterLocation;

use crate::inline::inline_diff;
use crate::template::Template;
use crate::wrap::wrap;

/// Rendering options.
#[derive(Clone, Debug, Default)]
pub struct FormatOptions {
    /// Include nested detail blocks under each headline.
    pub detailed: bool,
    /// Wrap column; `None` leaves lines unwrapped.
    pub print_width: Option<usize>,
    /// Change kind tags to omit from the output.
    pub exclude: Vec<String>,
    /// Template override; `None` uses the defaults.
    pub template: Option<Template>,
}

/// Render a change set as changelog text.
pub fn format(
    old: &DocumentIr,
    new: &DocumentIr,
    set: &ChangeSet,
    options: &FormatOptions,
) -> String {
    let template = options.template.clone().unwrap_or_default();
    let breaking: Vec<&Change> = retained(&set.breaking, options);
    let non_breaking: Vec<&Change> = retained(&set.non_breaking, options);

    if breaking.is_empty() && non_breaking.is_empty() {
        return template.no_changes.clone();
    }

    let mut writer = Writer {
        lines: Vec::new(),
        template: &template,
        print_width: options.print_width,
    };
    if !breaking.is_empty() {
        render_section(&mut writer, &template.breaking_heading, &breaking, old, new, options);
    }
    if !non_breaking.is_empty() {
        if !writer.lines.is_empty() {
            writer.blank();
        }
        render_section(&mut writer, &template.changes_heading, &non_breaking, old, new, options);
    }
    writer.lines.join("\n")
}

fn retained<'a>(changes: &'a [Change], options: &FormatOptions) -> Vec<&'a Change> {
    changes
        .iter()
        .filter(|change| !options.exclude.iter().any(|tag| tag == change.kind_tag()))
        .collect()
}

fn render_section(
    writer: &mut Writer<'_>,
    heading: &str,
    changes: &[&Change],
    old: &DocumentIr,
    new: &DocumentIr,
    options: &FormatOptions,
) {
    writer.push(0, heading);
    writer.blank();
    for group in group_changes(changes) {
        for change in group {
            let bullet_line = format!("{}{}", writer.template.bullet, headline(change));
            writer.push(0, &bullet_line);
            if options.detailed {
                render_detail(writer, change, old, new);
            }
        }
    }
}

/// Group changes by owning operation, keeping first-appearance order and
/// moving the shared-entity group (no operation) to the end. Each group is
/// sorted by kind tag; the sort is stable, so equal tags keep their
/// original relative order.
fn group_changes<'a>(changes: &[&'a Change]) -> Vec<Vec<&'a Change>> {
    let mut groups: Vec<(Option<&OperationKey>, Vec<&'a Change>)> = Vec::new();
    for change in changes {
        let key = change.operation();
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(change),
            None => groups.push((key, vec![change])),
        }
    }
    if let Some(position) = groups.iter().position(|(key, _)| key.is_none()) {
        let shared = groups.remove(position);
        groups.push(shared);
    }
    groups
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by_key(|change| change.kind_tag());
            members
        })
        .collect()
}

fn headline(change: &Change) -> String {
    match change {
        Change::OperationRemoval { operation } => format!("Removed {operation}"),
        Change::OperationAddition { operation } => format!("Added {operation}"),
        Change::OperationDeprecation { operation } => format!("Deprecated {operation}"),
        Change::OperationDocumentationChange { operation } => {
            format!("Changed documentation of {operation}")
        }
        Change::OperationParameterRemoval {
            operation,
            name,
            location,
        } => format!("Removed {location} parameter {name} from {operation}"),
        Change::OperationParameterAddition {
            operation,
            name,
            location,
        } => format!("Added {location} parameter {name} to {operation}"),
        Change::OperationParameterTypeChange {
            operation,
            name,
            location,
        } => format!("Changed type of {location} parameter {name} of {operation}"),
        Change::OperationParameterDeprecation {
            operation,
            name,
            location,
        } => format!("Deprecated {location} parameter {name} of {operation}"),
        Change::OperationParameterDocumentationChange {
            operation,
            name,
            location,
        } => format!("Changed documentation of {location} parameter {name} of {operation}"),
        Change::OperationResponseRemoval { operation, code } => {
            format!("Removed response {code} from {operation}")
        }
        Change::OperationResponseAddition { operation, code } => {
            format!("Added response {code} to {operation}")
        }
        Change::OperationResponseTypeChange { operation, code } => {
            format!("Changed type of response {code} of {operation}")
        }
        Change::OperationResponseDocumentationChange { operation, code } => {
            format!("Changed documentation of response {code} of {operation}")
        }
        Change::SharedParameterTypeChange { name } => {
            format!("Changed type of shared parameter {name}")
        }
        Change::SharedParameterDocumentationChange { name } => {
            format!("Changed documentation of shared parameter {name}")
        }
        Change::SharedSchemaDocumentationChange { name } => {
            format!("Changed documentation of shared schema {name}")
        }
    }
}

fn render_detail(writer: &mut Writer<'_>, change: &Change, old: &DocumentIr, new: &DocumentIr) {
    match change {
        Change::OperationRemoval { operation } => {
            if let Some(op) = old.operation(operation) {
                if let Some(description) = &op.description {
                    writer.push(1, description);
                }
            }
        }
        Change::OperationAddition { operation } | Change::OperationDeprecation { operation } => {
            if let Some(op) = new.operation(operation) {
                if let Some(description) = &op.description {
                    writer.push(1, description);
                }
            }
        }
        Change::OperationDocumentationChange { operation } => {
            let old_text = old.operation(operation).and_then(|op| op.description.as_deref());
            let new_text = new.operation(operation).and_then(|op| op.description.as_deref());
            push_inline_diff(writer, old_text, new_text);
        }
        Change::OperationParameterRemoval {
            operation,
            name,
            location,
        } => {
            if let Some(param) = lookup_parameter(old, operation, name, *location) {
                push_parameter_detail(writer, param);
            }
        }
        Change::OperationParameterAddition {
            operation,
            name,
            location,
        }
        | Change::OperationParameterDeprecation {
            operation,
            name,
            location,
        } => {
            if let Some(param) = lookup_parameter(new, operation, name, *location) {
                push_parameter_detail(writer, param);
            }
        }
        Change::OperationParameterTypeChange {
            operation,
            name,
            location,
        } => {
            let old_label =
                lookup_parameter(old, operation, name, *location).map(|p| p.type_label.as_str());
            let new_label =
                lookup_parameter(new, operation, name, *location).map(|p| p.type_label.as_str());
            push_old_new(writer, old_label, new_label);
        }
        Change::OperationParameterDocumentationChange {
            operation,
            name,
            location,
        } => {
            let old_text = lookup_parameter(old, operation, name, *location)
                .and_then(|p| p.description.as_deref());
            let new_text = lookup_parameter(new, operation, name, *location)
                .and_then(|p| p.description.as_deref());
            push_inline_diff(writer, old_text, new_text);
        }
        Change::OperationResponseRemoval { operation, code } => {
            if let Some(response) = lookup_response(old, operation, code) {
                push_response_detail(writer, response);
            }
        }
        Change::OperationResponseAddition { operation, code } => {
            if let Some(response) = lookup_response(new, operation, code) {
                push_response_detail(writer, response);
            }
        }
        Change::OperationResponseTypeChange { operation, code } => {
            let old_label = lookup_response(old, operation, code).map(|r| r.type_label.as_str());
            let new_label = lookup_response(new, operation, code).map(|r| r.type_label.as_str());
            push_old_new(writer, old_label, new_label);
        }
        Change::OperationResponseDocumentationChange { operation, code } => {
            let old_text =
                lookup_response(old, operation, code).and_then(|r| r.description.as_deref());
            let new_text =
                lookup_response(new, operation, code).and_then(|r| r.description.as_deref());
            push_inline_diff(writer, old_text, new_text);
        }
        Change::SharedParameterTypeChange { name } => {
            let old_label = old.shared_parameter(name).map(|p| p.type_label.as_str());
            let new_label = new.shared_parameter(name).map(|p| p.type_label.as_str());
            push_old_new(writer, old_label, new_label);
            if let Some(param) = new.shared_parameter(name) {
                push_occurrences(writer, &param.occurrences);
            }
        }
        Change::SharedParameterDocumentationChange { name } => {
            let old_text = old.shared_parameter(name).and_then(|p| p.description.as_deref());
            let new_text = new.shared_parameter(name).and_then(|p| p.description.as_deref());
            push_inline_diff(writer, old_text, new_text);
            if let Some(param) = new.shared_parameter(name) {
                push_occurrences(writer, &param.occurrences);
            }
        }
        Change::SharedSchemaDocumentationChange { name } => {
            let old_text = old.shared_schema(name).and_then(|s| s.description.as_deref());
            let new_text = new.shared_schema(name).and_then(|s| s.description.as_deref());
            push_inline_diff(writer, old_text, new_text);
            if let Some(schema) = new.shared_schema(name) {
                push_occurrences(writer, &schema.occurrences);
            }
        }
    }
}

fn lookup_parameter<'a>(
    ir: &'a DocumentIr,
    operation: &OperationKey,
    name: &str,
    location: ParameterLocation,
) -> Option<&'a ParameterIr> {
    ir.operation(operation)?.parameter(name, location)
}

fn lookup_response<'a>(
    ir: &'a DocumentIr,
    operation: &OperationKey,
    code: &str,
) -> Option<&'a ResponseIr> {
    ir.operation(operation)?.response(code)
}

fn push_parameter_detail(writer: &mut Writer<'_>, param: &ParameterIr) {
    writer.push_labeled(1, "Type", &param.type_label);
    if let Some(description) = &param.description {
        writer.push(1, description);
    }
    if let Some(examples) = &param.examples {
        writer.push_labeled(1, "Examples", examples);
    }
}

fn push_response_detail(writer: &mut Writer<'_>, response: &ResponseIr) {
    writer.push_labeled(1, "Type", &response.type_label);
    if let Some(description) = &response.description {
        writer.push(1, description);
    }
    if let Some(examples) = &response.examples {
        writer.push_labeled(1, "Examples", examples);
    }
}

fn push_old_new(writer: &mut Writer<'_>, old_label: Option<&str>, new_label: Option<&str>) {
    if let Some(label) = old_label {
        writer.push_labeled(1, "Old", label);
    }
    if let Some(label) = new_label {
        writer.push_labeled(1, "New", label);
    }
}

fn push_inline_diff(writer: &mut Writer<'_>, old_text: Option<&str>, new_text: Option<&str>) {
    if old_text.is_none() && new_text.is_none() {
        return;
    }
    let rendered = inline_diff(old_text.unwrap_or(""), new_text.unwrap_or(""));
    if !rendered.is_empty() {
        writer.push(1, &rendered);
    }
}

fn push_occurrences(writer: &mut Writer<'_>, occurrences: &[OperationKey]) {
    if occurrences.is_empty() {
        return;
    }
    let listed: Vec<String> = occurrences.iter().map(|key| key.to_string()).collect();
    writer.push_labeled(1, "Used by", &listed.join(", "));
}

/// Line accumulator that applies depth padding and width wrapping.
struct Writer<'a> {
    lines: Vec<String>,
    template: &'a Template,
    print_width: Option<usize>,
}

impl Writer<'_> {
    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Push text at a nesting depth. Padding comes off the width budget.
    fn push(&mut self, depth: usize, text: &str) {
        let padding = self.template.indent_unit.repeat(depth);
        match self.print_width {
            Some(width) => {
                let budget = width.saturating_sub(padding.chars().count());
                for line in wrap(text, budget) {
                    self.emit(&padding, &line);
                }
            }
            None => {
                for line in text.split('\n') {
                    self.emit(&padding, line);
                }
            }
        }
    }

    /// Push a `Label: value` line, spilling multi-line values into an
    /// extra nesting level under a bare `Label:` line.
    fn push_labeled(&mut self, depth: usize, label: &str, value: &str) {
        if value.contains('\n') {
            self.push(depth, &format!("{label}:"));
            self.push(depth + 1, value);
        } else {
            self.push(depth, &format!("{label}: {value}"));
        }
    }

    fn emit(&mut self, padding: &str, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{padding}{line}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oac_diff::diff;
    use oac_model::{Document, HttpMethod};
    use serde_json::json;

    fn ir_from(value: serde_json::Value) -> DocumentIr {
        let doc: Document = serde_json::from_value(value).unwrap();
        oac_ir::extract(&doc)
    }

    fn pets_ir(limit_deprecated: bool, with_offset: bool, version: &str) -> DocumentIr {
        let mut parameters = vec![json!({
            "name": "limit",
            "in": "query",
            "deprecated": limit_deprecated,
            "schema": { "type": "integer" }
        })];
        if with_offset {
            parameters.push(json!({
                "name": "offset",
                "in": "query",
                "schema": { "type": "integer" }
            }));
        }
        ir_from(json!({
            "info": { "title": "Pet Store", "version": version },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": parameters,
                        "responses": {}
                    }
                }
            }
        }))
    }

    #[test]
    fn empty_change_set_renders_no_changes_line() {
        let ir = DocumentIr::default();
        let set = diff(&ir, &ir);
        let text = format(&ir, &ir, &set, &FormatOptions::default());
        assert_eq!(text, "No changes");
    }

    #[test]
    fn deprecation_and_addition_scenario() {
        let old = pets_ir(false, false, "1.0.0");
        let new = pets_ir(true, true, "1.1.0");
        let set = diff(&old, &new);
        let text = format(&old, &new, &set, &FormatOptions::default());

        assert!(text.starts_with("Changes\n"));
        assert!(!text.contains("BREAKING CHANGES"));
        let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(
            bullets,
            vec![
                "- Added query parameter offset to GET /pets",
                "- Deprecated query parameter limit of GET /pets"
            ]
        );
    }

    #[test]
    fn breaking_section_comes_first() {
        let old = ir_from(json!({
            "info": { "title": "t", "version": "1.0.0" },
            "paths": {
                "/pets": { "get": { "responses": {} } },
                "/orders": { "get": { "responses": {} } }
            }
        }));
        let new = ir_from(json!({
            "info": { "title": "t", "version": "2.0.0" },
            "paths": {
                "/pets": { "get": { "responses": {} }, "post": { "responses": {} } }
            }
        }));
        let set = diff(&old, &new);
        let text = format(&old, &new, &set, &FormatOptions::default());

        let expected = "BREAKING CHANGES\n\n- Removed GET /orders\n\nChanges\n\n- Added POST /pets";
        assert_eq!(text, expected);
    }

    #[test]
    fn excluding_every_kind_leaves_no_changes() {
        let old = pets_ir(false, false, "1.0.0");
        let new = pets_ir(true, true, "1.1.0");
        let set = diff(&old, &new);

        let options = FormatOptions {
            exclude: vec![
                "operation-parameter-deprecation".to_string(),
                "operation-parameter-addition".to_string(),
            ],
            ..FormatOptions::default()
        };
        assert_eq!(format(&old, &new, &set, &options), "No changes");

        // Excluding just one kind keeps the other.
        let options = FormatOptions {
            exclude: vec!["operation-parameter-deprecation".to_string()],
            ..FormatOptions::default()
        };
        let text = format(&old, &new, &set, &options);
        assert!(text.contains("offset"));
        assert!(!text.contains("limit"));
    }

    #[test]
    fn groups_keep_first_appearance_order_and_sort_by_tag() {
        let ir = DocumentIr::default();
        let mut set = ChangeSet::new(oac_diff::compare("1", "1"));
        set.push(Change::OperationDocumentationChange {
            operation: OperationKey::new("/b", HttpMethod::Get),
        });
        set.push(Change::OperationAddition {
            operation: OperationKey::new("/a", HttpMethod::Get),
        });
        set.push(Change::SharedSchemaDocumentationChange { name: "Pet".into() });
        set.push(Change::OperationDeprecation {
            operation: OperationKey::new("/b", HttpMethod::Get),
        });

        let text = format(&ir, &ir, &set, &FormatOptions::default());
        let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(
            bullets,
            vec![
                // /b group first (first appearance), its tags sorted.
                "- Deprecated GET /b",
                "- Changed documentation of GET /b",
                "- Added GET /a",
                // Shared changes trail the operation groups.
                "- Changed documentation of shared schema Pet",
            ]
        );
    }

    #[test]
    fn detailed_type_change_lists_old_and_new() {
        let old = ir_from(json!({
            "info": { "title": "t", "version": "1.0.0" },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            { "name": "id", "in": "query", "schema": { "type": "string" } }
                        ],
                        "responses": {}
                    }
                }
            }
        }));
        let new = ir_from(json!({
            "info": { "title": "t", "version": "1.0.1" },
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            { "name": "id", "in": "query", "schema": { "type": "integer" } }
                        ],
                        "responses": {}
                    }
                }
            }
        }));
        let set = diff(&old, &new);

        let headline_only = format(&old, &new, &set, &FormatOptions::default());
        assert!(!headline_only.contains("Old:"));

        let options = FormatOptions {
            detailed: true,
            ..FormatOptions::default()
        };
        let text = format(&old, &new, &set, &options);
        assert!(text.contains("- Changed type of query parameter id of GET /pets"));
        assert!(text.contains("\n  Old: string\n"));
        assert!(text.ends_with("  New: integer"));
    }

    #[test]
    fn detailed_documentation_change_uses_inline_markers() {
        let old = ir_from(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": { "get": { "summary": "Returns pets", "responses": {} } }
            }
        }));
        let new = ir_from(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": { "get": { "summary": "Returns all pets", "responses": {} } }
            }
        }));
        let set = diff(&old, &new);
        let options = FormatOptions {
            detailed: true,
            ..FormatOptions::default()
        };
        let text = format(&old, &new, &set, &options);
        assert!(text.contains("- Changed documentation of GET /pets"));
        assert!(text.contains("  Returns **all** pets"));
    }

    #[test]
    fn missing_entities_degrade_to_headline_only() {
        let ir = DocumentIr::default();
        let mut set = ChangeSet::new(oac_diff::compare("1", "1"));
        set.push(Change::OperationParameterTypeChange {
            operation: OperationKey::new("/ghost", HttpMethod::Get),
            name: "id".into(),
            location: ParameterLocation::Query,
        });

        let options = FormatOptions {
            detailed: true,
            ..FormatOptions::default()
        };
        let text = format(&ir, &ir, &set, &options);
        assert_eq!(
            text,
            "BREAKING CHANGES\n\n- Changed type of query parameter id of GET /ghost"
        );
    }

    #[test]
    fn print_width_wraps_and_respects_indent_budget() {
        let old = ir_from(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {}
        }));
        let new = ir_from(json!({
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "Returns every pet known to the store with paging support",
                        "responses": {}
                    }
                }
            }
        }));
        let set = diff(&old, &new);
        let options = FormatOptions {
            detailed: true,
            print_width: Some(30),
            ..FormatOptions::default()
        };
        let text = format(&old, &new, &set, &options);
        assert!(text.lines().count() > 4);
        for line in text.lines() {
            assert!(line.chars().count() <= 30, "{line:?}");
        }
        // Detail lines keep their nesting padding after wrapping.
        assert!(text.lines().filter(|l| l.starts_with("  ")).count() >= 2);
    }

    #[test]
    fn template_override_restyles_output() {
        let old = pets_ir(false, false, "1.0.0");
        let new = pets_ir(true, true, "1.1.0");
        let set = diff(&old, &new);

        let template = Template {
            changes_heading: "## What changed".to_string(),
            bullet: "* ".to_string(),
            ..Template::default()
        };
        let options = FormatOptions {
            template: Some(template),
            ..FormatOptions::default()
        };
        let text = format(&old, &new, &set, &options);
        assert!(text.starts_with("## What changed\n"));
        assert!(text.contains("* Added query parameter offset to GET /pets"));
        assert!(!text.contains("- Added"));
    }
}
