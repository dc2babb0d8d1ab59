//! Plan operation - describe the edits a feature applies.

use graft_patch::{Config, Feature};
use graft_ts::{AnchorSpec, EditOperation};

use crate::reports::{PlanReport, PlannedEdit};

/// Execute the plan operation.
pub fn plan(config: &Config, feature: Feature) -> PlanReport {
    let edits = feature
        .plan(config)
        .edits
        .iter()
        .map(|edit| PlannedEdit {
            edit: edit.to_string(),
            placement: placement(edit),
        })
        .collect();

    PlanReport {
        feature,
        file: config.target.file.clone(),
        class: config.target.class.clone(),
        edits,
    }
}

/// Where an edit goes, in order of preference.
fn placement(edit: &EditOperation) -> Vec<String> {
    let mut tiers = Vec::new();
    match edit {
        EditOperation::InsertImport(e) => {
            if let Some(after) = &e.after {
                tiers.push(format!("after {}", AnchorSpec::import(after)));
            }
            tiers.push("after the last import".to_string());
            tiers.push("at the top of the file".to_string());
        }
        EditOperation::EnsureNamedImport(e) => {
            tiers.push(format!("into {}", AnchorSpec::import(&e.specifier)));
        }
        EditOperation::InsertMethod(e) => {
            if let Some(before) = &e.before {
                tiers.push(format!("before {}", AnchorSpec::method(before)));
            }
            tiers.push("at the end of the class".to_string());
        }
        EditOperation::InsertConstructorStatement(e) => {
            if let Some(before) = &e.before {
                tiers.push(format!("before {}", AnchorSpec::call(before)));
            }
            if let Some(after) = &e.after {
                tiers.push(format!("after {}", AnchorSpec::call(after)));
            }
            tiers.push("at the end of the constructor".to_string());
        }
    }
    tiers
}
