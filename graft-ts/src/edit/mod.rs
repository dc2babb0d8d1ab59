//! Structural edit operations.
//!
//! Every edit is idempotent: applying it to a document that already contains
//! its result reports [`EditOutcome::AlreadyPresent`] and leaves the document
//! unchanged. Missing anchors are never errors; edits fall back to a
//! documented default position instead.

mod constructor;
mod imports;
mod methods;

use std::fmt;

pub use constructor::{CallSpec, ConstructorEdit};
pub use imports::{ImportEdit, NamedImportEdit};
pub use methods::{MethodEdit, MethodSpec, Param};

use crate::{
    Result,
    model::{Entry, SourceDocument},
};

/// Where an edit put its node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Directly after the named anchor.
    After(String),
    /// Directly before the named anchor.
    Before(String),
    /// At the end of the container (for imports: after the last import).
    End,
    /// At the start of the container.
    Start,
    /// Inside a constructor synthesized for the edit.
    NewConstructor,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::After(anchor) => write!(f, "after {}", anchor),
            Placement::Before(anchor) => write!(f, "before {}", anchor),
            Placement::End => f.write_str("at end"),
            Placement::Start => f.write_str("at start"),
            Placement::NewConstructor => f.write_str("in new constructor"),
        }
    }
}

/// Result of applying one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The node was added.
    Inserted(Placement),
    /// An existing node was removed and re-added at its canonical position.
    Repositioned(Placement),
    /// The document already contained the node; nothing changed.
    AlreadyPresent,
    /// The edit could not be applied and was skipped.
    Skipped(String),
}

impl EditOutcome {
    /// Whether the document was modified.
    pub fn changed(&self) -> bool {
        matches!(self, EditOutcome::Inserted(_) | EditOutcome::Repositioned(_))
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Inserted(placement) => write!(f, "inserted {}", placement),
            EditOutcome::Repositioned(placement) => write!(f, "moved {}", placement),
            EditOutcome::AlreadyPresent => f.write_str("already present"),
            EditOutcome::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

/// Category of an edit, used to group edits into phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Import,
    Method,
    Constructor,
}

/// A single structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    InsertImport(ImportEdit),
    EnsureNamedImport(NamedImportEdit),
    InsertMethod(MethodEdit),
    InsertConstructorStatement(ConstructorEdit),
}

impl EditOperation {
    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::InsertImport(_) | EditOperation::EnsureNamedImport(_) => EditKind::Import,
            EditOperation::InsertMethod(_) => EditKind::Method,
            EditOperation::InsertConstructorStatement(_) => EditKind::Constructor,
        }
    }

    /// Apply the edit to `doc`.
    ///
    /// Method and constructor edits target the class named `class` and fail
    /// with [`Error::MissingClass`](crate::Error::MissingClass) when the
    /// document has none.
    pub fn apply(&self, doc: &mut SourceDocument, class: &str) -> Result<EditOutcome> {
        match self {
            EditOperation::InsertImport(edit) => Ok(edit.apply(doc)),
            EditOperation::EnsureNamedImport(edit) => Ok(edit.apply(doc)),
            EditOperation::InsertMethod(edit) => edit.apply(doc, class),
            EditOperation::InsertConstructorStatement(edit) => edit.apply(doc, class),
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOperation::InsertImport(edit) => write!(f, "import '{}'", edit.import.specifier()),
            EditOperation::EnsureNamedImport(edit) => {
                write!(f, "bind {} from '{}'", edit.name, edit.specifier)
            }
            EditOperation::InsertMethod(edit) => write!(f, "method {}()", edit.method.name),
            EditOperation::InsertConstructorStatement(edit) => {
                write!(f, "constructor call this.{}()", edit.call.method)
            }
        }
    }
}

/// Leading blank line of an entry, on its first comment if it has one.
fn leading_blank<T>(entry: &mut Entry<T>) -> &mut bool {
    match entry.comments.first_mut() {
        Some(comment) => &mut comment.blank_before,
        None => &mut entry.blank_before,
    }
}

/// Insert `entry` at `index`, keeping the displaced first child separated.
fn insert_entry<T>(entries: &mut Vec<Entry<T>>, index: usize, entry: Entry<T>) {
    if index == 0
        && let Some(first) = entries.first_mut()
    {
        *leading_blank(first) = true;
    }
    entries.insert(index, entry);
}
