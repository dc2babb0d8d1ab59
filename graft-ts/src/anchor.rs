//! Anchor resolution.
//!
//! An anchor is an existing child of a container, identified by kind and
//! name, that edits use as a relative insertion point. Resolution is a linear
//! scan in declaration order and the first match wins.

use std::fmt;

use tracing::debug;

use crate::model::{
    ClassDeclaration, ClassMember, ConstructorMember, Entry, Item, SourceDocument, Statement,
};

/// What an anchor name is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// Import declaration, matched by module specifier.
    Import,
    /// Class method, matched by method name.
    Method,
    /// Constructor statement, matched by the `this.<method>(...)` it calls.
    Call,
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::Import => f.write_str("import"),
            AnchorKind::Method => f.write_str("method"),
            AnchorKind::Call => f.write_str("call"),
        }
    }
}

/// A request to locate the child of kind `kind` named `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSpec {
    pub kind: AnchorKind,
    pub name: String,
}

impl AnchorSpec {
    pub fn new(kind: AnchorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn import(specifier: impl Into<String>) -> Self {
        Self::new(AnchorKind::Import, specifier)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(AnchorKind::Method, name)
    }

    pub fn call(method: impl Into<String>) -> Self {
        Self::new(AnchorKind::Call, method)
    }
}

impl fmt::Display for AnchorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AnchorKind::Import => write!(f, "import '{}'", self.name),
            AnchorKind::Method => write!(f, "method {}()", self.name),
            AnchorKind::Call => write!(f, "call this.{}()", self.name),
        }
    }
}

/// Result of resolving an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Index of the matching child.
    Found(usize),
    NotFound,
}

impl Position {
    /// Insertion index placing a new child directly before the anchor.
    pub fn before(self) -> Option<usize> {
        match self {
            Position::Found(index) => Some(index),
            Position::NotFound => None,
        }
    }

    /// Insertion index placing a new child directly after the anchor.
    pub fn after(self) -> Option<usize> {
        match self {
            Position::Found(index) => Some(index + 1),
            Position::NotFound => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Position::Found(_))
    }
}

/// A node that can be named by an anchor.
pub trait Anchored {
    /// Name this node answers to for anchors of `kind`, if any.
    fn anchor_name(&self, kind: AnchorKind) -> Option<&str>;
}

impl Anchored for Item {
    fn anchor_name(&self, kind: AnchorKind) -> Option<&str> {
        match (self, kind) {
            (Item::Import(import), AnchorKind::Import) => Some(import.specifier()),
            _ => None,
        }
    }
}

impl Anchored for ClassMember {
    fn anchor_name(&self, kind: AnchorKind) -> Option<&str> {
        match (self, kind) {
            (ClassMember::Method(method), AnchorKind::Method) => Some(method.name()),
            _ => None,
        }
    }
}

impl Anchored for Statement {
    fn anchor_name(&self, kind: AnchorKind) -> Option<&str> {
        match kind {
            AnchorKind::Call => self.call().map(|c| c.method_name()),
            _ => None,
        }
    }
}

/// An ordered container of anchorable children.
pub trait Container {
    type Child: Anchored;

    fn children(&self) -> &[Entry<Self::Child>];

    /// Locate the first child matching `spec`.
    fn resolve(&self, spec: &AnchorSpec) -> Position {
        let position = self
            .children()
            .iter()
            .position(|entry| entry.node.anchor_name(spec.kind) == Some(spec.name.as_str()))
            .map_or(Position::NotFound, Position::Found);
        debug!(anchor = %spec, ?position, "resolved anchor");
        position
    }
}

impl Container for SourceDocument {
    type Child = Item;

    fn children(&self) -> &[Entry<Item>] {
        &self.items
    }
}

impl Container for ClassDeclaration {
    type Child = ClassMember;

    fn children(&self) -> &[Entry<ClassMember>] {
        &self.members
    }
}

impl Container for ConstructorMember {
    type Child = Statement;

    fn children(&self) -> &[Entry<Statement>] {
        &self.statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = r#"import 'reflect-metadata';
import morgan from 'morgan';
import helmet from 'helmet';

class App {
  constructor() {
    this.initializeRoutes();
    // this.initializeErrorHandling();
    this.initializeErrorHandling();
  }

  private initializeRoutes() {}

  private initializeErrorHandling() {}
}
"#;

    fn doc() -> SourceDocument {
        SourceDocument::parse(APP, "app.ts").unwrap()
    }

    #[test]
    fn test_resolve_import() {
        let doc = doc();
        assert_eq!(doc.resolve(&AnchorSpec::import("morgan")), Position::Found(1));
        assert_eq!(doc.resolve(&AnchorSpec::import("cors")), Position::NotFound);
        // kinds do not cross
        assert_eq!(doc.resolve(&AnchorSpec::method("morgan")), Position::NotFound);
    }

    #[test]
    fn test_resolve_method() {
        let doc = doc();
        let class = doc.class("App").unwrap();
        let position = class.resolve(&AnchorSpec::method("initializeErrorHandling"));
        assert_eq!(position, Position::Found(2));
        assert_eq!(position.before(), Some(2));
        assert_eq!(position.after(), Some(3));
    }

    #[test]
    fn test_resolve_call_ignores_comments() {
        let doc = doc();
        let ctor = doc.class("App").unwrap().constructor().unwrap();
        let position = ctor.resolve(&AnchorSpec::call("initializeErrorHandling"));
        assert_eq!(position, Position::Found(1));
        assert_eq!(ctor.statements()[1].comments.len(), 1);
    }

    #[test]
    fn test_not_found_has_no_index() {
        assert_eq!(Position::NotFound.before(), None);
        assert_eq!(Position::NotFound.after(), None);
        assert!(!Position::NotFound.is_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(AnchorSpec::call("run").to_string(), "call this.run()");
        assert_eq!(AnchorSpec::import("morgan").to_string(), "import 'morgan'");
    }
}
