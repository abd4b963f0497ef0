//! Rendering template: the fixed text fragments the formatter emits.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChangelogError, ChangelogResult};

/// The fixed strings of a rendered changelog.
///
/// A template restyles headings, bullets, and indentation without touching
/// the formatter. Loaded from TOML, any omitted key keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Heading of the breaking-changes section.
    pub breaking_heading: String,
    /// Heading of the non-breaking section.
    pub changes_heading: String,
    /// The single line emitted when the change set is empty.
    pub no_changes: String,
    /// Prefix of every change headline.
    pub bullet: String,
    /// One level of left padding for nested detail blocks.
    pub indent_unit: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            breaking_heading: "BREAKING CHANGES".to_string(),
            changes_heading: "Changes".to_string(),
            no_changes: "No changes".to_string(),
            bullet: "- ".to_string(),
            indent_unit: "  ".to_string(),
        }
    }
}

impl Template {
    /// Load a template from a TOML file.
    pub fn from_path(path: &Path) -> ChangelogResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ChangelogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}
