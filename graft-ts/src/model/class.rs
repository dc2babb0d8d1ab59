//! Class declarations and their members.

use std::fmt;

use super::{Comment, Entry};
use crate::Block;

/// Member accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a statement does, as far as anchoring is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// `this.<name>(...)`, optionally awaited.
    Method(String),
}

impl CallTarget {
    pub fn method_name(&self) -> &str {
        match self {
            CallTarget::Method(name) => name,
        }
    }
}

/// A statement in a constructor body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub(crate) text: Block,
    pub(crate) call: Option<CallTarget>,
}

impl Statement {
    pub fn new(text: Block, call: Option<CallTarget>) -> Self {
        Self { text, call }
    }

    pub fn text(&self) -> &Block {
        &self.text
    }

    pub fn call(&self) -> Option<&CallTarget> {
        self.call.as_ref()
    }

    /// Whether this statement is a call to `this.<method>(...)`.
    pub fn calls(&self, method: &str) -> bool {
        self.call.as_ref().is_some_and(|c| c.method_name() == method)
    }
}

/// A class method with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMember {
    pub(crate) name: String,
    pub(crate) visibility: Option<Visibility>,
    pub(crate) is_static: bool,
    /// Everything before the body's opening brace: decorators, modifiers,
    /// name, parameters and return type.
    pub(crate) head: Block,
    /// Line comment following the opening brace.
    pub(crate) brace_comment: Option<String>,
    pub(crate) body: Block,
}

impl MethodMember {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn head(&self) -> &Block {
        &self.head
    }

    pub fn brace_comment(&self) -> Option<&str> {
        self.brace_comment.as_deref()
    }

    pub fn body(&self) -> &Block {
        &self.body
    }
}

/// The class constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorMember {
    pub(crate) head: Block,
    pub(crate) brace_comment: Option<String>,
    pub(crate) statements: Vec<Entry<Statement>>,
    pub(crate) dangling: Vec<Comment>,
}

impl ConstructorMember {
    /// A constructor without parameters containing `statements`.
    pub fn new(statements: Vec<Entry<Statement>>) -> Self {
        Self {
            head: Block::from_text("constructor()"),
            brace_comment: None,
            statements,
            dangling: Vec::new(),
        }
    }

    /// Declare `params` (source text, e.g. `apiPrefix: string`).
    pub fn params(mut self, params: &str) -> Self {
        self.head = Block::from_text(&format!("constructor({})", params));
        self
    }

    pub fn head(&self) -> &Block {
        &self.head
    }

    pub fn statements(&self) -> &[Entry<Statement>] {
        &self.statements
    }

    /// Whether any statement calls `this.<method>(...)`.
    pub fn calls(&self, method: &str) -> bool {
        self.statements.iter().any(|s| s.node.calls(method))
    }
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Constructor(ConstructorMember),
    Method(MethodMember),
    /// Properties, accessors, signatures, static blocks.
    Other(Block),
}

/// A class declaration, including any `export`/`export default` wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub(crate) name: String,
    /// Everything before the body's opening brace.
    pub(crate) header: Block,
    pub(crate) brace_comment: Option<String>,
    pub(crate) members: Vec<Entry<ClassMember>>,
    pub(crate) dangling: Vec<Comment>,
}

impl ClassDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &Block {
        &self.header
    }

    /// Line comment following the opening brace.
    pub fn brace_comment(&self) -> Option<&str> {
        self.brace_comment.as_deref()
    }

    pub fn members(&self) -> &[Entry<ClassMember>] {
        &self.members
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodMember> {
        self.members.iter().filter_map(|entry| match &entry.node {
            ClassMember::Method(method) => Some(method),
            _ => None,
        })
    }

    /// First method named `name`.
    pub fn method(&self, name: &str) -> Option<&MethodMember> {
        self.methods().find(|m| m.name == name)
    }

    pub fn constructor(&self) -> Option<&ConstructorMember> {
        self.members.iter().find_map(|entry| match &entry.node {
            ClassMember::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }

    pub(crate) fn constructor_mut(&mut self) -> Option<&mut ConstructorMember> {
        self.members.iter_mut().find_map(|entry| match &mut entry.node {
            ClassMember::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }

    /// Index of the first member that is a method.
    pub(crate) fn first_method_index(&self) -> Option<usize> {
        self.members
            .iter()
            .position(|entry| matches!(entry.node, ClassMember::Method(_)))
    }
}
