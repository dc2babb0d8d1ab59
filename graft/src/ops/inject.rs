//! Inject operation - patch the target file with a feature.

use std::path::Path;

use graft_patch::{Config, Feature, Patcher, Result};
use tracing::debug;

use crate::reports::InjectReport;

/// Execute the inject operation.
///
/// In a dry run nothing is written and the report carries the would-be file.
pub fn inject(config: Config, dest: &Path, feature: Feature, dry_run: bool) -> Result<InjectReport> {
    debug!(dest = %dest.display(), %feature, dry_run, "inject");
    let outcome = Patcher::new(config).dry_run(dry_run).inject(dest, feature)?;

    Ok(InjectReport { feature, outcome })
}
