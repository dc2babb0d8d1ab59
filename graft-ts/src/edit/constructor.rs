use tracing::{info, warn};

use super::{EditOutcome, Param, Placement, insert_entry, leading_blank};
use crate::{
    Block, Error, Result,
    anchor::{AnchorSpec, Container},
    model::{CallTarget, ClassMember, ConstructorMember, Entry, SourceDocument, Statement},
};

/// A `this.<method>(<args>);` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSpec {
    pub method: String,
    pub args: Vec<String>,
    /// Constructor parameters the arguments refer to.
    pub params: Vec<Param>,
}

impl CallSpec {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Pass the constructor parameter `param` as the next argument. A
    /// constructor created for the call declares it.
    pub fn forward(mut self, param: Param) -> Self {
        self.args.push(param.name.clone());
        self.params.push(param);
        self
    }

    pub fn to_source(&self) -> String {
        format!("this.{}({});", self.method, self.args.join(", "))
    }

    fn to_constructor(&self) -> ConstructorMember {
        let params: Vec<String> = self.params.iter().map(Param::to_source).collect();
        ConstructorMember::new(vec![Entry::new(self.to_statement())]).params(&params.join(", "))
    }

    fn to_statement(&self) -> Statement {
        Statement::new(
            Block::from_text(&self.to_source()),
            Some(CallTarget::Method(self.method.clone())),
        )
    }
}

/// Insert a call statement into the class constructor.
///
/// The statement goes directly before the call to `before`; failing that,
/// directly after the call to `after`; failing that, at the end of the
/// constructor. A class without a constructor gets one containing only the
/// new statement and declaring the call's forwarded parameters. A
/// constructor that already calls the method is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorEdit {
    pub call: CallSpec,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ConstructorEdit {
    pub fn new(call: CallSpec) -> Self {
        Self {
            call,
            before: None,
            after: None,
        }
    }

    pub fn before(mut self, method: impl Into<String>) -> Self {
        self.before = Some(method.into());
        self
    }

    pub fn after(mut self, method: impl Into<String>) -> Self {
        self.after = Some(method.into());
        self
    }

    pub(crate) fn apply(&self, doc: &mut SourceDocument, class: &str) -> Result<EditOutcome> {
        let target = doc
            .class_mut(class)
            .ok_or_else(|| Error::missing_class(class))?;
        let method = &self.call.method;

        let Some(ctor) = target.constructor_mut() else {
            let ctor = self.call.to_constructor();
            let index = target.first_method_index().unwrap_or(target.members.len());
            let entry = Entry::new(ClassMember::Constructor(ctor)).with_blank_before(true);
            insert_entry(&mut target.members, index, entry);
            warn!(class, call = %method, "class has no constructor, created one");
            return Ok(EditOutcome::Inserted(Placement::NewConstructor));
        };

        if ctor.calls(method) {
            info!(call = %method, "constructor call already present");
            return Ok(EditOutcome::AlreadyPresent);
        }

        let mut statement = Entry::new(self.call.to_statement());

        if let Some(before) = &self.before
            && let Some(index) = ctor.resolve(&AnchorSpec::call(before)).before()
        {
            // the new call takes over the successor's separation
            let successor = &mut ctor.statements[index];
            statement.blank_before = std::mem::take(leading_blank(successor));
            ctor.statements.insert(index, statement);
            let placement = Placement::Before(before.clone());
            info!(call = %method, %placement, "inserted constructor call");
            return Ok(EditOutcome::Inserted(placement));
        }

        if let Some(after) = &self.after
            && let Some(index) = ctor.resolve(&AnchorSpec::call(after)).after()
        {
            ctor.statements.insert(index, statement);
            let placement = Placement::After(after.clone());
            warn!(call = %method, %placement, "successor call not found, using fallback anchor");
            return Ok(EditOutcome::Inserted(placement));
        }

        if self.before.is_some() || self.after.is_some() {
            warn!(call = %method, "no call anchor found, appending to constructor");
        }
        ctor.statements.push(statement);
        info!(call = %method, "appended constructor call");
        Ok(EditOutcome::Inserted(Placement::End))
    }
}
