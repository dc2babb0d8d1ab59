//! Feature plans and the patch pipeline for graft.
//!
//! This crate turns a feature selection into an ordered plan of structural
//! edits and applies it to the application source file:
//!
//! - [`Config`] - `graft.toml` settings, all optional
//! - [`Feature`] / [`FeaturePlan`] - what to inject and where
//! - [`pipeline`] - phases, patch states and diagnostics
//! - [`Patcher`] - load, patch and atomically save one file

mod config;
mod error;
mod feature;
mod patcher;

pub mod pipeline;

pub use config::{
    AnchorsConfig, ApiDocsConfig, CONFIG_FILE, Config, StyleConfig, TargetConfig, is_identifier,
};
pub use error::{Error, Result, SOURCE_INJECTION};
pub use feature::{ApiDocsBody, Feature, FeaturePlan, api_docs_plan};
pub use patcher::{PatchOutcome, Patcher};
