//! Core operations.
//!
//! This module contains the business logic for graft commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod inject;
pub mod plan;

pub use check::check;
pub use inject::inject;
pub use plan::plan;
