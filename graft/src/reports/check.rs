//! Check command report data structures.

use std::path::PathBuf;

use graft_patch::Feature;

use super::output::{Output, Report};

/// Whether the target file already carries the feature.
#[derive(Debug, PartialEq, Eq)]
pub enum CheckStatus {
    /// Patching would not change the file.
    UpToDate,
    /// Patching would apply these edits.
    NeedsPatch(Vec<String>),
    /// The target file does not exist.
    Missing,
}

/// Report data from a dry-run patch.
#[derive(Debug)]
pub struct CheckReport {
    pub path: PathBuf,
    pub feature: Feature,
    /// Anchor fallbacks and skipped edits.
    pub warnings: Vec<String>,
    pub status: CheckStatus,
}

impl CheckReport {
    pub fn needs_patch(&self) -> bool {
        matches!(self.status, CheckStatus::NeedsPatch(_))
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        let path = self.path.display();
        match &self.status {
            CheckStatus::UpToDate => {
                out.preformatted(&format!("✓ {} has {}", path, self.feature));
            }
            CheckStatus::Missing => {
                out.preformatted(&format!("{} not found, nothing to check", path));
            }
            CheckStatus::NeedsPatch(edits) => {
                out.preformatted(&format!("✗ {} is missing {}", path, self.feature));
                for edit in edits {
                    out.added_item(edit);
                }
                out.newline();
                out.preformatted("Run `graft inject` to apply.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::Recorded;

    #[test]
    fn test_needs_patch() {
        let report = CheckReport {
            path: PathBuf::from("src/app.ts"),
            feature: Feature::ApiDocs,
            warnings: Vec::new(),
            status: CheckStatus::NeedsPatch(vec!["method initializeSwagger()".into()]),
        };
        assert!(report.needs_patch());

        let mut out = Recorded::default();
        report.render(&mut out);
        assert_eq!(out.stdout[0], "✗ src/app.ts is missing api-docs");
        assert_eq!(out.stdout[1], "+ method initializeSwagger()");
    }

    #[test]
    fn test_missing_file_passes() {
        let report = CheckReport {
            path: PathBuf::from("src/app.ts"),
            feature: Feature::ApiDocs,
            warnings: Vec::new(),
            status: CheckStatus::Missing,
        };
        assert!(!report.needs_patch());
    }
}
