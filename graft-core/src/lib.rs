//! Core utilities and types for graft.
//!
//! This crate provides the file primitives and the indented line writer
//! shared by the parser, the patch orchestrator and the CLI.

mod code_builder;
mod file;
mod indent;

// Code building
pub use code_builder::CodeBuilder;
// File operations
pub use file::{File, WriteResult, read_if_exists, write_atomic};
pub use indent::Indent;
