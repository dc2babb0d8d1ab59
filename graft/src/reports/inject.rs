//! Inject command report data structures.

use graft_patch::{Feature, PatchOutcome};

use super::output::{Output, Report};

/// Report data from patching one file.
#[derive(Debug)]
pub struct InjectReport {
    pub feature: Feature,
    pub outcome: PatchOutcome,
}

impl Report for InjectReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in self.outcome.diagnostics() {
            if diag.severity.is_warning() {
                out.warning(&diag.message);
            }
        }

        let path = self.outcome.path().display().to_string();
        match &self.outcome {
            PatchOutcome::Skipped { .. } => {
                out.preformatted(&format!("Skipped {}: file not found", path));
            }
            PatchOutcome::Unchanged { .. } => {
                out.preformatted(&format!("{} already has {}", path, self.feature));
            }
            PatchOutcome::Written { applied, .. } => {
                out.key_value("Patched", &path);
                for applied in applied.iter().filter(|a| a.outcome.changed()) {
                    out.added_item(&format!("{} ({})", applied.edit, applied.outcome));
                }
            }
            PatchOutcome::Pending {
                applied, content, ..
            } => {
                out.divider(&path);
                out.preformatted(content.trim_end());
                out.divider("Summary");
                let count = applied.iter().filter(|a| a.outcome.changed()).count();
                out.preformatted(&format!(
                    "{} edit{} would be applied",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use graft_patch::pipeline::{AppliedEdit, Diagnostic};
    use graft_ts::{EditOperation, EditOutcome, ImportDeclaration, ImportEdit, Placement};

    use super::*;
    use crate::reports::output::testing::Recorded;

    fn applied() -> Vec<AppliedEdit> {
        vec![AppliedEdit {
            edit: EditOperation::InsertImport(ImportEdit::new(
                ImportDeclaration::new("swagger-jsdoc").default_binding("swaggerJSDoc"),
                Some("morgan"),
            )),
            outcome: EditOutcome::Inserted(Placement::End),
        }]
    }

    #[test]
    fn test_written_lists_changes_and_warnings() {
        let report = InjectReport {
            feature: Feature::ApiDocs,
            outcome: PatchOutcome::Written {
                path: PathBuf::from("src/app.ts"),
                diagnostics: vec![Diagnostic::warning("imports", "anchor 'morgan' not found")],
                applied: applied(),
            },
        };
        let mut out = Recorded::default();
        report.render(&mut out);

        assert_eq!(out.stderr, ["anchor 'morgan' not found"]);
        assert_eq!(
            out.stdout,
            [
                "Patched: src/app.ts",
                "+ import 'swagger-jsdoc' (inserted at end)"
            ]
        );
    }

    #[test]
    fn test_skipped() {
        let report = InjectReport {
            feature: Feature::ApiDocs,
            outcome: PatchOutcome::Skipped {
                path: PathBuf::from("src/app.ts"),
            },
        };
        let mut out = Recorded::default();
        report.render(&mut out);

        assert_eq!(out.stdout, ["Skipped src/app.ts: file not found"]);
    }
}
