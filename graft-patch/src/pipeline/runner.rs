//! Pipeline orchestrator.

use graft_ts::SourceDocument;
use tracing::{debug, error};

use super::{EditPhase, PatchContext, PatchState, Phase};
use crate::{Error, FeaturePlan, Result};

/// The patch pipeline orchestrator.
///
/// The pipeline checks that the target class exists, then runs the built-in
/// phases (imports, method, constructor) strictly in order. Later phases see
/// the edits made by earlier ones.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new().run(document, plan, "App")?;
///
/// for diag in &ctx.diagnostics {
///     if diag.severity.is_warning() {
///         eprintln!("warning: {}", diag.message);
///     }
/// }
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: vec![
                Box::new(EditPhase::imports()),
                Box::new(EditPhase::method()),
                Box::new(EditPhase::constructor()),
            ],
        }
    }

    /// Names of the phases in execution order.
    pub fn phase_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.phases.iter().map(|phase| phase.name())
    }

    /// Apply `plan` to `document`, targeting the class named `class`.
    ///
    /// # Errors
    ///
    /// Fails with a structural precondition error, before any edit is made,
    /// when the document has no class named `class`.
    pub fn run(
        &self,
        document: SourceDocument,
        plan: FeaturePlan,
        class: &str,
    ) -> Result<PatchContext> {
        let mut ctx = PatchContext::new(document, plan, class);

        if ctx.document.class(class).is_none() {
            ctx.advance(PatchState::Failed);
            error!(class, document = ctx.document.name(), "target class not found");
            return Err(Error::precondition(class, ctx.document.name()));
        }

        for phase in &self.phases {
            debug!(phase = phase.name(), description = phase.description(), "running phase");
            if let Err(e) = phase.run(&mut ctx) {
                ctx.advance(PatchState::Failed);
                return Err(e);
            }
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, Feature};

    const APP: &str = "import morgan from 'morgan';\nimport { PORT } from '@config/env';\n\nclass App {\n  constructor() {\n    this.initializeRoutes();\n    this.initializeErrorHandling();\n  }\n\n  private initializeRoutes() {}\n\n  private initializeErrorHandling() {}\n}\n";

    fn run(source: &str, class: &str) -> Result<PatchContext> {
        let document = SourceDocument::parse(source, "app.ts").unwrap();
        let plan = Feature::ApiDocs.plan(&Config::default());
        Pipeline::new().run(document, plan, class)
    }

    #[test]
    fn test_phases_in_order() {
        let names: Vec<_> = Pipeline::new().phase_names().collect();
        assert_eq!(names, ["imports", "method", "constructor"]);
    }

    #[test]
    fn test_run_reaches_constructor_patched() {
        let ctx = run(APP, "App").unwrap();
        assert_eq!(ctx.state, PatchState::ConstructorPatched);
        assert_eq!(ctx.applied.len(), 5);
        assert!(ctx.changed());
        assert!(!ctx.has_warnings());
    }

    #[test]
    fn test_missing_class_fails_before_editing() {
        let err = run(APP, "Server").unwrap_err();
        match *err {
            Error::StructuralPrecondition { phase, class, .. } => {
                assert_eq!(phase, "source-injection");
                assert_eq!(class, "Server");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rerun_only_reports_info() {
        let first = run(APP, "App").unwrap();
        let text = first.document.render(&Config::default().style());
        let second = run(&text, "App").unwrap();
        assert!(!second.changed());
        assert_eq!(second.warning_count(), 0);
    }
}
