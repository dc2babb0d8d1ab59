//! Plan command report data structures.

use std::path::PathBuf;

use graft_patch::Feature;

use super::output::{Output, Report};

/// The edits a feature applies, in order.
#[derive(Debug)]
pub struct PlanReport {
    pub feature: Feature,
    /// Target file relative to the project directory.
    pub file: PathBuf,
    pub class: String,
    pub edits: Vec<PlannedEdit>,
}

/// One edit and its placement tiers, most preferred first.
#[derive(Debug)]
pub struct PlannedEdit {
    pub edit: String,
    pub placement: Vec<String>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Feature", self.feature.as_str());
        out.key_value("Target", &format!("{} (class {})", self.file.display(), self.class));
        out.newline();

        out.section(&format!("Edits ({})", self.edits.len()));
        for (i, planned) in self.edits.iter().enumerate() {
            out.numbered_item(i + 1, &planned.edit);
            for (tier, placement) in planned.placement.iter().enumerate() {
                let prefix = if tier == 0 { "" } else { "else " };
                out.detail(&format!("{}{}", prefix, placement));
            }
        }
    }
}
