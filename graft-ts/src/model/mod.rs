//! In-memory model of a TypeScript source file.
//!
//! Only the constructs graft edits are modelled structurally: import
//! declarations, classes, their methods and constructors, and constructor
//! statements that call a method on `this`. Everything else is carried as an
//! opaque [`Block`] and re-emitted unchanged apart from indentation.

mod class;
mod import;

pub use class::{
    CallTarget, ClassDeclaration, ClassMember, ConstructorMember, MethodMember, Statement,
    Visibility,
};
pub use import::{ImportDeclaration, NamedImport};

use crate::Block;

/// A comment attached to the node that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Whether a blank line separates this comment from what precedes it.
    pub blank_before: bool,
    pub text: Block,
}

/// A child of a container (document, class body or constructor body) with
/// its surrounding trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    /// Comments on the lines directly above the node.
    pub comments: Vec<Comment>,
    /// Whether a blank line separates the node from what precedes it.
    pub blank_before: bool,
    pub node: T,
    /// Single-line comment on the same line as the end of the node.
    pub trailing: Option<String>,
}

impl<T> Entry<T> {
    pub fn new(node: T) -> Self {
        Self {
            comments: Vec::new(),
            blank_before: false,
            node,
            trailing: None,
        }
    }

    pub fn with_blank_before(mut self, blank_before: bool) -> Self {
        self.blank_before = blank_before;
        self
    }
}

/// A top-level item of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Import(ImportDeclaration),
    Class(ClassDeclaration),
    Other(Block),
}

/// A parsed source file.
///
/// Items keep their source order; rendering emits them in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub(crate) name: String,
    pub(crate) items: Vec<Entry<Item>>,
    pub(crate) dangling: Vec<Comment>,
}

impl SourceDocument {
    /// Display name used in diagnostics (usually the file path).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[Entry<Item>] {
        &self.items
    }

    /// Comments after the last item.
    pub fn dangling_comments(&self) -> &[Comment] {
        &self.dangling
    }

    /// Import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.items.iter().filter_map(|entry| match &entry.node {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }

    /// First import of `specifier`.
    pub fn import(&self, specifier: &str) -> Option<&ImportDeclaration> {
        self.imports().find(|i| i.specifier() == specifier)
    }

    pub fn import_mut(&mut self, specifier: &str) -> Option<&mut ImportDeclaration> {
        self.items.iter_mut().find_map(|entry| match &mut entry.node {
            Item::Import(import) if import.specifier() == specifier => Some(import),
            _ => None,
        })
    }

    /// Classes in source order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.items.iter().filter_map(|entry| match &entry.node {
            Item::Class(class) => Some(class),
            _ => None,
        })
    }

    /// First class named `name`.
    pub fn class(&self, name: &str) -> Option<&ClassDeclaration> {
        self.classes().find(|c| c.name() == name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassDeclaration> {
        self.items.iter_mut().find_map(|entry| match &mut entry.node {
            Item::Class(class) if class.name() == name => Some(class),
            _ => None,
        })
    }

    /// Index of the last import item.
    pub(crate) fn last_import_index(&self) -> Option<usize> {
        self.items
            .iter()
            .rposition(|entry| matches!(entry.node, Item::Import(_)))
    }

    /// Remove every import of `specifier`, returning how many were removed.
    pub(crate) fn remove_imports(&mut self, specifier: &str) -> usize {
        let before = self.items.len();
        self.items.retain(
            |entry| !matches!(&entry.node, Item::Import(import) if import.specifier() == specifier),
        );
        before - self.items.len()
    }
}
