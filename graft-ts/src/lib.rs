//! TypeScript source document model for graft.
//!
//! This crate turns an application source file into a mutable tree of
//! top-level declarations, lets callers locate anchors in it and apply
//! idempotent structural edits, then renders the tree back to canonical text.
//!
//! # Usage
//!
//! ```ignore
//! use graft_ts::{EditOperation, ImportDeclaration, ImportEdit, SourceDocument, Style};
//!
//! let mut doc = SourceDocument::parse(source, "src/app.ts")?;
//! let edit = EditOperation::InsertImport(ImportEdit::new(
//!     ImportDeclaration::new("swagger-jsdoc").default_binding("swaggerJSDoc"),
//!     Some("morgan"),
//! ));
//! edit.apply(&mut doc, "App")?;
//! let text = doc.render(&Style::default());
//! ```
//!
//! # Module Organization
//!
//! - [`model`] - documents, imports, classes, members and statements
//! - [`anchor`] - first-match anchor resolution inside containers
//! - [`edit`] - import, method and constructor edit operations
//! - parsing (tree-sitter) and rendering live on [`SourceDocument`]

mod block;
mod error;
mod parse;
mod render;
mod style;

pub mod anchor;
pub mod edit;
pub mod model;

pub use anchor::{AnchorKind, AnchorSpec, Anchored, Container, Position};
pub use block::{Block, Line};
pub use edit::{
    CallSpec, ConstructorEdit, EditKind, EditOperation, EditOutcome, ImportEdit, MethodEdit,
    MethodSpec, NamedImportEdit, Param, Placement,
};
pub use error::{Error, Result};
pub use model::{
    CallTarget, ClassDeclaration, ClassMember, Comment, ConstructorMember, Entry,
    ImportDeclaration, Item, MethodMember, NamedImport, SourceDocument, Statement, Visibility,
};
pub use style::{Quote, Style};
