//! The classified change model.
//!
//! Every observable difference between two document IRs is one [`Change`]
//! variant, tagged for serialization by its kind string. Classification is
//! total: [`Change::is_breaking`] is defined for every variant, and a
//! change set stores each record in exactly one of its two lists.

use oac_ir::OperationKey;
use oac_model::ParameterLocation;
use serde::{Deserialize, Serialize};

use crate::version::VersionChange;

/// One classified difference between two documents.
///
/// Each variant carries the identity fields needed to look the entity back
/// up in either IR when rendering detail: the owning operation key, the
/// parameter name and location, the response code, or the shared name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Change {
    OperationRemoval {
        operation: OperationKey,
    },
    OperationAddition {
        operation: OperationKey,
    },
    OperationDeprecation {
        operation: OperationKey,
    },
    OperationDocumentationChange {
        operation: OperationKey,
    },
    OperationParameterRemoval {
        operation: OperationKey,
        name: String,
        location: ParameterLocation,
    },
    OperationParameterAddition {
        operation: OperationKey,
        name: String,
        location: ParameterLocation,
    },
    OperationParameterTypeChange {
        operation: OperationKey,
        name: String,
        location: ParameterLocation,
    },
    OperationParameterDeprecation {
        operation: OperationKey,
        name: String,
        location: ParameterLocation,
    },
    OperationParameterDocumentationChange {
        operation: OperationKey,
        name: String,
        location: ParameterLocation,
    },
    OperationResponseRemoval {
        operation: OperationKey,
        code: String,
    },
    OperationResponseAddition {
        operation: OperationKey,
        code: String,
    },
    OperationResponseTypeChange {
        operation: OperationKey,
        code: String,
    },
    OperationResponseDocumentationChange {
        operation: OperationKey,
        code: String,
    },
    SharedParameterTypeChange {
        name: String,
    },
    SharedParameterDocumentationChange {
        name: String,
    },
    SharedSchemaDocumentationChange {
        name: String,
    },
}

impl Change {
    /// The serialized kind tag, also used for sorting and exclusion.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Change::OperationRemoval { .. } => "operation-removal",
            Change::OperationAddition { .. } => "operation-addition",
            Change::OperationDeprecation { .. } => "operation-deprecation",
            Change::OperationDocumentationChange { .. } => "operation-documentation-change",
            Change::OperationParameterRemoval { .. } => "operation-parameter-removal",
            Change::OperationParameterAddition { .. } => "operation-parameter-addition",
            Change::OperationParameterTypeChange { .. } => "operation-parameter-type-change",
            Change::OperationParameterDeprecation { .. } => "operation-parameter-deprecation",
            Change::OperationParameterDocumentationChange { .. } => {
                "operation-parameter-documentation-change"
            }
            Change::OperationResponseRemoval { .. } => "operation-response-removal",
            Change::OperationResponseAddition { .. } => "operation-response-addition",
            Change::OperationResponseTypeChange { .. } => "operation-response-type-change",
            Change::OperationResponseDocumentationChange { .. } => {
                "operation-response-documentation-change"
            }
            Change::SharedParameterTypeChange { .. } => "shared-parameter-type-change",
            Change::SharedParameterDocumentationChange { .. } => {
                "shared-parameter-documentation-change"
            }
            Change::SharedSchemaDocumentationChange { .. } => "shared-schema-documentation-change",
        }
    }

    /// The classification policy: removals and type changes of operations,
    /// operation parameters, operation responses, and shared parameter
    /// types break consumers; additions, deprecations, and documentation
    /// changes do not.
    pub fn is_breaking(&self) -> bool {
        matches!(
            self,
            Change::OperationRemoval { .. }
                | Change::OperationParameterRemoval { .. }
                | Change::OperationParameterTypeChange { .. }
                | Change::OperationResponseRemoval { .. }
                | Change::OperationResponseTypeChange { .. }
                | Change::SharedParameterTypeChange { .. }
        )
    }

    /// The owning operation, if this change is operation-scoped.
    pub fn operation(&self) -> Option<&OperationKey> {
        match self {
            Change::OperationRemoval { operation }
            | Change::OperationAddition { operation }
            | Change::OperationDeprecation { operation }
            | Change::OperationDocumentationChange { operation }
            | Change::OperationParameterRemoval { operation, .. }
            | Change::OperationParameterAddition { operation, .. }
            | Change::OperationParameterTypeChange { operation, .. }
            | Change::OperationParameterDeprecation { operation, .. }
            | Change::OperationParameterDocumentationChange { operation, .. }
            | Change::OperationResponseRemoval { operation, .. }
            | Change::OperationResponseAddition { operation, .. }
            | Change::OperationResponseTypeChange { operation, .. }
            | Change::OperationResponseDocumentationChange { operation, .. } => Some(operation),
            Change::SharedParameterTypeChange { .. }
            | Change::SharedParameterDocumentationChange { .. }
            | Change::SharedSchemaDocumentationChange { .. } => None,
        }
    }
}

/// The full result of diffing two documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Old and new version strings with their semver delta flags.
    pub version: VersionChange,
    /// Changes that can break existing consumers.
    pub breaking: Vec<Change>,
    /// Additive and informational changes.
    pub non_breaking: Vec<Change>,
}

impl ChangeSet {
    /// An empty change set for the given version transition.
    pub fn new(version: VersionChange) -> Self {
        Self {
            version,
            breaking: Vec::new(),
            non_breaking: Vec::new(),
        }
    }

    /// Route a change into the list its classification demands.
    pub fn push(&mut self, change: Change) {
        if change.is_breaking() {
            self.breaking.push(change);
        } else {
            self.non_breaking.push(change);
        }
    }

    /// Returns `true` if neither list has entries.
    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty() && self.non_breaking.is_empty()
    }

    /// Total number of change records.
    pub fn len(&self) -> usize {
        self.breaking.len() + self.non_breaking.len()
    }
}
