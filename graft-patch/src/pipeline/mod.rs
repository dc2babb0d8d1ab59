//! Patch pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that applies a feature
//! plan to a loaded document. The pipeline provides:
//!
//! - An explicit structural precondition (the target class exists)
//! - Strictly ordered phases (imports → method → constructor)
//! - Unified diagnostics collection on a [`PatchContext`]
//!
//! Loading and saving the file around a run is the job of
//! [`Patcher`](crate::Patcher).

mod context;
mod diagnostic;
mod phase;
mod runner;

pub use context::{AppliedEdit, PatchContext, PatchState};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{EditPhase, Phase};
pub use runner::Pipeline;
