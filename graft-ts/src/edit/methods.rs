use tracing::{info, warn};

use super::{EditOutcome, Placement, insert_entry};
use crate::{
    Block, Error, Result,
    anchor::{AnchorSpec, Container},
    model::{ClassMember, Entry, MethodMember, SourceDocument, Visibility},
};

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            ..Self::new(name)
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub(crate) fn to_source(&self) -> String {
        let mut out = self.name.clone();
        if let Some(ty) = &self.ty {
            out.push_str(": ");
            out.push_str(ty);
        }
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}

/// A method to be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub visibility: Option<Visibility>,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub body: Block,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>, body: Block) -> Self {
        Self {
            name: name.into(),
            visibility: None,
            params: Vec::new(),
            return_type: None,
            body,
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// The method signature, e.g. `private initializeSwagger(apiPrefix: string)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::to_source).collect();
        let mut head = String::new();
        if let Some(visibility) = self.visibility {
            head.push_str(visibility.as_str());
            head.push(' ');
        }
        head.push_str(&self.name);
        head.push('(');
        head.push_str(&params.join(", "));
        head.push(')');
        if let Some(ty) = &self.return_type {
            head.push_str(": ");
            head.push_str(ty);
        }
        head
    }

    fn to_member(&self) -> MethodMember {
        MethodMember {
            name: self.name.clone(),
            visibility: self.visibility,
            is_static: false,
            head: Block::from_text(&self.signature()),
            brace_comment: None,
            body: self.body.clone(),
        }
    }
}

/// Insert a method directly before the method named `before`, or at the end
/// of the class when that anchor is absent. Existing methods of the same name
/// are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEdit {
    pub method: MethodSpec,
    pub before: Option<String>,
}

impl MethodEdit {
    pub fn new(method: MethodSpec, before: Option<impl Into<String>>) -> Self {
        Self {
            method,
            before: before.map(Into::into),
        }
    }

    pub(crate) fn apply(&self, doc: &mut SourceDocument, class: &str) -> Result<EditOutcome> {
        let target = doc
            .class_mut(class)
            .ok_or_else(|| Error::missing_class(class))?;
        let name = &self.method.name;

        if target.method(name).is_some() {
            info!(method = %name, "method already present");
            return Ok(EditOutcome::AlreadyPresent);
        }

        let anchored = self.before.as_deref().and_then(|before| {
            target
                .resolve(&AnchorSpec::method(before))
                .before()
                .map(|i| (i, Placement::Before(before.to_string())))
        });
        let (index, placement) = match anchored {
            Some(found) => found,
            None => {
                if let Some(before) = &self.before {
                    warn!(method = %name, anchor = %before, "method anchor not found, appending to class");
                }
                (target.members.len(), Placement::End)
            }
        };

        let entry = Entry::new(ClassMember::Method(self.method.to_member())).with_blank_before(true);
        insert_entry(&mut target.members, index, entry);
        info!(method = %name, %placement, "inserted method");
        Ok(EditOutcome::Inserted(placement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Style;

    const APP: &str = "class App {
  public port: number;

  private initializeRoutes() {
    this.app.use(router);
  }

  private initializeErrorHandling() {
    this.app.use(errorMiddleware);
  }
}
";

    fn edit(before: Option<&str>) -> MethodEdit {
        let spec = MethodSpec::new("initializeSwagger", Block::from_text("setup();"))
            .visibility(Visibility::Private)
            .param(Param::typed("apiPrefix", "string"));
        MethodEdit::new(spec, before)
    }

    fn member_names(doc: &SourceDocument) -> Vec<String> {
        doc.class("App")
            .unwrap()
            .members()
            .iter()
            .map(|m| match &m.node {
                ClassMember::Method(method) => method.name().to_string(),
                ClassMember::Constructor(_) => "constructor".to_string(),
                ClassMember::Other(_) => "other".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_signature() {
        let spec = MethodSpec::new("listen", Block::new())
            .visibility(Visibility::Public)
            .param(Param::typed("port", "number").with_default("3000"))
            .param(Param::new("cb"))
            .returns("void");
        assert_eq!(spec.signature(), "public listen(port: number = 3000, cb): void");
    }

    #[test]
    fn test_inserts_before_successor() {
        let mut doc = SourceDocument::parse(APP, "app.ts").unwrap();
        let outcome = edit(Some("initializeErrorHandling")).apply(&mut doc, "App").unwrap();

        assert_eq!(outcome, EditOutcome::Inserted(Placement::Before("initializeErrorHandling".into())));
        assert_eq!(
            member_names(&doc),
            ["other", "initializeRoutes", "initializeSwagger", "initializeErrorHandling"]
        );
        assert!(doc.render(&Style::default()).contains(
            "  }\n\n  private initializeSwagger(apiPrefix: string) {\n    setup();\n  }\n\n  private initializeErrorHandling() {\n"
        ));
    }

    #[test]
    fn test_missing_successor_appends() {
        let mut doc = SourceDocument::parse(APP, "app.ts").unwrap();
        let outcome = edit(Some("initializeAuth")).apply(&mut doc, "App").unwrap();

        assert_eq!(outcome, EditOutcome::Inserted(Placement::End));
        assert_eq!(member_names(&doc).last().map(String::as_str), Some("initializeSwagger"));
    }

    #[test]
    fn test_existing_method_is_kept() {
        let mut doc = SourceDocument::parse(APP, "app.ts").unwrap();
        let mut existing = edit(Some("initializeErrorHandling"));
        existing.method.name = "initializeRoutes".to_string();
        let before = doc.clone();

        assert_eq!(existing.apply(&mut doc, "App").unwrap(), EditOutcome::AlreadyPresent);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_class_is_an_error() {
        let mut doc = SourceDocument::parse("const x = 1;\n", "app.ts").unwrap();
        let err = edit(None).apply(&mut doc, "App").unwrap_err();
        assert!(matches!(*err, Error::MissingClass { .. }));
    }
}
