//! Check operation - is a feature already applied?

use std::path::Path;

use graft_patch::{Config, Feature, PatchOutcome, Patcher, Result};

use crate::reports::{CheckReport, CheckStatus};

/// Execute the check operation.
///
/// Runs the patch as a dry run and reports whether saving it would change
/// the file.
pub fn check(config: Config, dest: &Path, feature: Feature) -> Result<CheckReport> {
    let outcome = Patcher::new(config).dry_run(true).inject(dest, feature)?;

    let warnings = outcome
        .diagnostics()
        .iter()
        .filter(|d| d.severity.is_warning())
        .map(|d| d.message.clone())
        .collect();

    let status = match &outcome {
        PatchOutcome::Skipped { .. } => CheckStatus::Missing,
        PatchOutcome::Unchanged { .. } | PatchOutcome::Written { .. } => CheckStatus::UpToDate,
        PatchOutcome::Pending { applied, .. } => CheckStatus::NeedsPatch(
            applied
                .iter()
                .filter(|a| a.outcome.changed())
                .map(|a| format!("{} ({})", a.edit, a.outcome))
                .collect(),
        ),
    };

    Ok(CheckReport {
        path: outcome.path().to_path_buf(),
        feature,
        warnings,
        status,
    })
}
