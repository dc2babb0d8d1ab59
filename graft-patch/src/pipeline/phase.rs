//! Pipeline phases.

use graft_ts::{EditKind, EditOperation, EditOutcome, Placement};
use tracing::info;

use super::{AppliedEdit, Diagnostic, PatchContext, PatchState};
use crate::Result;

/// A phase in the patch pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads and
/// modifies the patch context and records diagnostics for anything that did
/// not go as planned.
pub trait Phase {
    /// The name of this phase (used in diagnostics).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the patch context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Missing anchors and
    /// already-applied edits are recorded as diagnostics instead.
    fn run(&self, ctx: &mut PatchContext) -> Result<()>;
}

/// Applies every planned edit of one kind, then advances the state.
pub struct EditPhase {
    name: &'static str,
    description: &'static str,
    kind: EditKind,
    completes: PatchState,
}

impl EditPhase {
    pub fn imports() -> Self {
        Self {
            name: "imports",
            description: "insert and reposition import declarations",
            kind: EditKind::Import,
            completes: PatchState::ImportsPatched,
        }
    }

    pub fn method() -> Self {
        Self {
            name: "method",
            description: "insert class methods",
            kind: EditKind::Method,
            completes: PatchState::MethodPatched,
        }
    }

    pub fn constructor() -> Self {
        Self {
            name: "constructor",
            description: "insert constructor statements",
            kind: EditKind::Constructor,
            completes: PatchState::ConstructorPatched,
        }
    }
}

impl Phase for EditPhase {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn run(&self, ctx: &mut PatchContext) -> Result<()> {
        let edits: Vec<EditOperation> = ctx.plan.edits_of(self.kind).cloned().collect();
        for edit in edits {
            let outcome = edit.apply(&mut ctx.document, &ctx.class)?;
            info!(phase = self.name, edit = %edit, outcome = %outcome, "applied edit");
            let diagnostic = diagnose(self.name, &edit, &outcome).at(&ctx.class);
            ctx.add_diagnostic(diagnostic);
            ctx.applied.push(AppliedEdit { edit, outcome });
        }
        ctx.advance(self.completes);
        Ok(())
    }
}

/// Describe an edit outcome, warning when the edit missed its preferred
/// position.
fn diagnose(phase: &'static str, edit: &EditOperation, outcome: &EditOutcome) -> Diagnostic {
    let placement = match outcome {
        EditOutcome::AlreadyPresent => {
            return Diagnostic::info(phase, format!("{}: already present", edit));
        }
        EditOutcome::Skipped(reason) => {
            return Diagnostic::warning(phase, format!("{}: skipped, {}", edit, reason));
        }
        EditOutcome::Inserted(placement) | EditOutcome::Repositioned(placement) => placement,
    };

    match preferred(edit) {
        Some(wanted) if wanted != *placement => Diagnostic::warning(
            phase,
            format!("{}: {} not found, placed {}", edit, describe(&wanted), placement),
        ),
        _ => Diagnostic::info(phase, format!("{}: {}", edit, outcome)),
    }
}

/// The placement an edit achieves when its first-choice anchor exists.
fn preferred(edit: &EditOperation) -> Option<Placement> {
    match edit {
        EditOperation::InsertImport(e) => e.after.clone().map(Placement::After),
        EditOperation::EnsureNamedImport(_) => None,
        EditOperation::InsertMethod(e) => e.before.clone().map(Placement::Before),
        EditOperation::InsertConstructorStatement(e) => match (&e.before, &e.after) {
            (Some(before), _) => Some(Placement::Before(before.clone())),
            (None, Some(after)) => Some(Placement::After(after.clone())),
            (None, None) => None,
        },
    }
}

fn describe(placement: &Placement) -> String {
    match placement {
        Placement::After(anchor) | Placement::Before(anchor) => format!("anchor '{}'", anchor),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use graft_ts::{CallSpec, ConstructorEdit, ImportDeclaration, ImportEdit};

    use super::*;
    use crate::pipeline::Severity;

    #[test]
    fn test_fallback_is_a_warning() {
        let edit = EditOperation::InsertConstructorStatement(
            ConstructorEdit::new(CallSpec::new("initializeSwagger"))
                .before("initializeErrorHandling")
                .after("initializeRoutes"),
        );
        let diag = diagnose(
            "constructor",
            &edit,
            &EditOutcome::Inserted(Placement::After("initializeRoutes".into())),
        );
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(
            diag.message,
            "constructor call this.initializeSwagger(): anchor 'initializeErrorHandling' not found, placed after initializeRoutes"
        );
    }

    #[test]
    fn test_preferred_placement_is_info() {
        let edit = EditOperation::InsertImport(ImportEdit::new(
            ImportDeclaration::new("swagger-jsdoc").default_binding("swaggerJSDoc"),
            Some("morgan"),
        ));
        let diag = diagnose(
            "imports",
            &edit,
            &EditOutcome::Inserted(Placement::After("morgan".into())),
        );
        assert_eq!(diag.severity, Severity::Info);
        assert_eq!(diag.message, "import 'swagger-jsdoc': inserted after morgan");
    }

    #[test]
    fn test_already_present_is_info() {
        let edit = EditOperation::InsertImport(ImportEdit::new(
            ImportDeclaration::new("cors"),
            None::<&str>,
        ));
        let diag = diagnose("imports", &edit, &EditOutcome::AlreadyPresent);
        assert_eq!(diag.severity, Severity::Info);
        assert_eq!(diag.message, "import 'cors': already present");
    }
}
