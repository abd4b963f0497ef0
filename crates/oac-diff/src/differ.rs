//! Entity differencing across two document IRs.
//!
//! Each entity class follows the same two-pass pattern: walk `old` to find
//! removals and field-level changes on matched keys, then walk `new` to
//! find additions. IR list order drives iteration, so output order is
//! stable for identical inputs. Shared parameters and schemas are the
//! exception: they never emit additions or removals, only type and
//! documentation changes on entities present in both documents.

use oac_ir::{DocumentIr, OperationIr};

use crate::changes::{Change, ChangeSet};
use crate::version;

/// Compute the classified change set between two document snapshots.
pub fn diff(old: &DocumentIr, new: &DocumentIr) -> ChangeSet {
    let mut set = ChangeSet::new(version::compare(&old.version, &new.version));
    diff_operations(old, new, &mut set);
    diff_shared_parameters(old, new, &mut set);
    diff_shared_schemas(old, new, &mut set);
    set
}

fn diff_operations(old: &DocumentIr, new: &DocumentIr, set: &mut ChangeSet) {
    // Removals and matched-pair comparisons.
    for old_op in &old.operations {
        match new.operation(&old_op.key) {
            Some(new_op) => {
                if old_op == new_op {
                    continue;
                }
                diff_matched_operation(old_op, new_op, set);
            }
            None => set.push(Change::OperationRemoval {
                operation: old_op.key.clone(),
            }),
        }
    }

    // Additions. A new operation emits exactly one record; its parameters
    // and responses are part of the addition, not separate changes.
    for new_op in &new.operations {
        if old.operation(&new_op.key).is_none() {
            set.push(Change::OperationAddition {
                operation: new_op.key.clone(),
            });
        }
    }
}

fn diff_matched_operation(old_op: &OperationIr, new_op: &OperationIr, set: &mut ChangeSet) {
    if !old_op.deprecated && new_op.deprecated {
        set.push(Change::OperationDeprecation {
            operation: old_op.key.clone(),
        });
    }
    if old_op.description != new_op.description {
        set.push(Change::OperationDocumentationChange {
            operation: old_op.key.clone(),
        });
    }
    diff_parameters(old_op, new_op, set);
    diff_responses(old_op, new_op, set);
}

fn diff_parameters(old_op: &OperationIr, new_op: &OperationIr, set: &mut ChangeSet) {
    for old_param in &old_op.parameters {
        match new_op.parameter(&old_param.name, old_param.location) {
            Some(new_param) => {
                if old_param.type_label != new_param.type_label {
                    set.push(Change::OperationParameterTypeChange {
                        operation: old_op.key.clone(),
                        name: old_param.name.clone(),
                        location: old_param.location,
                    });
                }
                if !old_param.deprecated && new_param.deprecated {
                    set.push(Change::OperationParameterDeprecation {
                        operation: old_op.key.clone(),
                        name: old_param.name.clone(),
                        location: old_param.location,
                    });
                }
                if old_param.description != new_param.description {
                    set.push(Change::OperationParameterDocumentationChange {
                        operation: old_op.key.clone(),
                        name: old_param.name.clone(),
                        location: old_param.location,
                    });
                }
            }
            None => set.push(Change::OperationParameterRemoval {
                operation: old_op.key.clone(),
                name: old_param.name.clone(),
                location: old_param.location,
            }),
        }
    }

    for new_param in &new_op.parameters {
        if old_op.parameter(&new_param.name, new_param.location).is_none() {
            set.push(Change::OperationParameterAddition {
                operation: new_op.key.clone(),
                name: new_param.name.clone(),
                location: new_param.location,
            });
        }
    }
}

fn diff_responses(old_op: &OperationIr, new_op: &OperationIr, set: &mut ChangeSet) {
    for old_response in &old_op.responses {
        match new_op.response(&old_response.code) {
            Some(new_response) => {
                if old_response.type_label != new_response.type_label {
                    set.push(Change::OperationResponseTypeChange {
                        operation: old_op.key.clone(),
                        code: old_response.code.clone(),
                    });
                }
                if old_response.description != new_response.description {
                    set.push(Change::OperationResponseDocumentationChange {
                        operation: old_op.key.clone(),
                        code: old_response.code.clone(),
                    });
                }
            }
            None => set.push(Change::OperationResponseRemoval {
                operation: old_op.key.clone(),
                code: old_response.code.clone(),
            }),
        }
    }

    for new_response in &new_op.responses {
        if old_op.response(&new_response.code).is_none() {
            set.push(Change::OperationResponseAddition {
                operation: new_op.key.clone(),
                code: new_response.code.clone(),
            });
        }
    }
}

fn diff_shared_parameters(old: &DocumentIr, new: &DocumentIr, set: &mut ChangeSet) {
    for old_param in &old.parameters {
        let Some(new_param) = new.shared_parameter(&old_param.name) else {
            continue;
        };
        if old_param.type_label != new_param.type_label {
            set.push(Change::SharedParameterTypeChange {
                name: old_param.name.clone(),
            });
        }
        if old_param.description != new_param.description {
            set.push(Change::SharedParameterDocumentationChange {
                name: old_param.name.clone(),
            });
        }
    }
}

fn diff_shared_schemas(old: &DocumentIr, new: &DocumentIr, set: &mut ChangeSet) {
    for old_schema in &old.schemas {
        let Some(new_schema) = new.shared_schema(&old_schema.name) else {
            continue;
        };
        if old_schema.description != new_schema.description {
            set.push(Change::SharedSchemaDocumentationChange {
                name: old_schema.name.clone(),
            });
        }
    }
}
