//! Patch context passed through pipeline phases.

use std::fmt;

use graft_ts::{EditOperation, EditOutcome, SourceDocument};
use tracing::debug;

use super::diagnostic::{Diagnostic, Severity};
use crate::FeaturePlan;

/// Progress of one patch run.
///
/// Runs move strictly forward through `Loaded`, `ImportsPatched`,
/// `MethodPatched`, `ConstructorPatched` and `Saved`. `Skipped` ends a run
/// whose file does not exist and `Failed` ends a run that hit a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    Loaded,
    ImportsPatched,
    MethodPatched,
    ConstructorPatched,
    Saved,
    Skipped,
    Failed,
}

impl PatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PatchState::Saved | PatchState::Skipped | PatchState::Failed)
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_advance_to(&self, next: PatchState) -> bool {
        use PatchState::*;
        matches!(
            (self, next),
            (Loaded, ImportsPatched)
                | (ImportsPatched, MethodPatched)
                | (MethodPatched, ConstructorPatched)
                | (ConstructorPatched, Saved)
        ) || (next == Failed && !self.is_terminal())
    }
}

impl fmt::Display for PatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchState::Loaded => "loaded",
            PatchState::ImportsPatched => "imports patched",
            PatchState::MethodPatched => "method patched",
            PatchState::ConstructorPatched => "constructor patched",
            PatchState::Saved => "saved",
            PatchState::Skipped => "skipped",
            PatchState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// An edit together with what applying it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub edit: EditOperation,
    pub outcome: EditOutcome,
}

/// Context passed through all pipeline phases.
///
/// The context owns the document for the duration of the run; phases mutate
/// it in order and record what they did.
#[derive(Debug)]
pub struct PatchContext {
    /// The document being patched.
    pub document: SourceDocument,
    /// The plan being applied.
    pub plan: FeaturePlan,
    /// Name of the class the plan targets.
    pub class: String,
    pub state: PatchState,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Every edit attempted, in order.
    pub applied: Vec<AppliedEdit>,
}

impl PatchContext {
    /// Create a new context for a freshly loaded document.
    pub fn new(document: SourceDocument, plan: FeaturePlan, class: impl Into<String>) -> Self {
        Self {
            document,
            plan,
            class: class.into(),
            state: PatchState::Loaded,
            diagnostics: Vec::new(),
            applied: Vec::new(),
        }
    }

    /// Move to `next`, ignoring transitions the state machine does not allow.
    pub fn advance(&mut self, next: PatchState) -> bool {
        if !self.state.can_advance_to(next) {
            debug!(from = %self.state, to = %next, "ignored state transition");
            return false;
        }
        debug!(from = %self.state, to = %next, "patch state");
        self.state = next;
        true
    }

    /// Whether any edit modified the document.
    pub fn changed(&self) -> bool {
        self.applied.iter().any(|a| a.outcome.changed())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
