//! Import declarations.

use graft_core::CodeBuilder;

use crate::{Block, Style};

/// A named binding inside `{ ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub name: String,
    pub alias: Option<String>,
    pub type_only: bool,
    /// Comments on the lines above the binding.
    pub comments: Vec<String>,
    /// Comment after the binding's comma.
    pub trailing: Option<String>,
}

impl NamedImport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_only: false,
            comments: Vec::new(),
            trailing: None,
        }
    }

    fn has_comments(&self) -> bool {
        !self.comments.is_empty() || self.trailing.is_some()
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Name the binding is visible under in the importing module.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    fn to_source(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        match &self.alias {
            Some(alias) => format!("{}{} as {}", type_kw, self.name, alias),
            None => format!("{}{}", type_kw, self.name),
        }
    }
}

/// An `import ... from '...'` or `import x = require('...')` declaration.
///
/// The module specifier is the declaration's identity: a document holds at
/// most one import per specifier after an import edit has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub(crate) specifier: String,
    pub(crate) type_only: bool,
    pub(crate) default: Option<String>,
    pub(crate) namespace: Option<String>,
    pub(crate) named: Vec<NamedImport>,
    /// Comments after the last named binding, before `}`.
    pub(crate) brace_comments: Vec<String>,
    pub(crate) attributes: Option<String>,
    /// `import <default> = require('...')`.
    pub(crate) require: bool,
    /// Source text of an import whose comments sit outside its named
    /// bindings. Rendered as is; the bindings above are still known.
    pub(crate) verbatim: Option<Block>,
}

impl ImportDeclaration {
    /// Side-effect import of `specifier`; add bindings with the builder methods.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            type_only: false,
            default: None,
            namespace: None,
            named: Vec::new(),
            brace_comments: Vec::new(),
            attributes: None,
            require: false,
            verbatim: None,
        }
    }

    /// Import a default export.
    pub fn default_binding(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(NamedImport::new(name));
        self
    }

    /// Import the module namespace (`* as name`).
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn named_imports(&self) -> &[NamedImport] {
        &self.named
    }

    pub fn is_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    /// Whether this is an `import x = require('...')` declaration.
    pub fn is_require(&self) -> bool {
        self.require
    }

    /// Whether the declaration is re-emitted from its source text.
    pub fn is_verbatim(&self) -> bool {
        self.verbatim.is_some()
    }

    /// Whether `name` is imported as a named binding.
    pub fn binds(&self, name: &str) -> bool {
        self.named.iter().any(|n| n.name == name)
    }

    pub(crate) fn push_named(&mut self, named: NamedImport) {
        self.named.push(named);
    }

    /// Render the import to a CodeBuilder.
    pub(crate) fn render(&self, builder: &mut CodeBuilder, style: &Style) {
        if let Some(verbatim) = &self.verbatim {
            verbatim.render(builder);
            return;
        }

        let quote = style.quote.for_text(&self.specifier);
        let type_kw = if self.type_only { "type " } else { "" };
        let attributes = self
            .attributes
            .as_ref()
            .map(|a| format!(" {}", a))
            .unwrap_or_default();
        let tail = format!("{q}{}{q}{};", self.specifier, attributes, q = quote);

        if self.require {
            let name = self.default.as_deref().unwrap_or_default();
            builder.push_line(&format!(
                "import {}{} = require({q}{}{q});",
                type_kw,
                name,
                self.specifier,
                q = quote
            ));
            return;
        }

        let mut head = Vec::new();
        if let Some(default) = &self.default {
            head.push(default.clone());
        }
        if let Some(namespace) = &self.namespace {
            head.push(format!("* as {}", namespace));
        }

        if head.is_empty() && self.named.is_empty() {
            builder.push_line(&format!("import {}", tail));
            return;
        }

        let named: Vec<String> = self.named.iter().map(NamedImport::to_source).collect();
        let mut clause = head.clone();
        if !named.is_empty() {
            clause.push(format!("{{ {} }}", named.join(", ")));
        }
        let one_line = format!("import {}{} from {}", type_kw, clause.join(", "), tail);
        let width = builder.current_indent() * style.indent.width() + one_line.len();
        let commented =
            !self.brace_comments.is_empty() || self.named.iter().any(NamedImport::has_comments);

        if !commented && (width <= style.print_width || named.len() < 2) {
            builder.push_line(&one_line);
            return;
        }

        let prefix = head
            .iter()
            .map(|h| format!("{}, ", h))
            .collect::<String>();
        builder.push_line(&format!("import {}{}{{", type_kw, prefix));
        builder.push_indent();
        for (binding, source) in self.named.iter().zip(&named) {
            for comment in &binding.comments {
                Block::from_text(comment).render(builder);
            }
            builder.push_line(&format!("{},", source));
            if let Some(trailing) = &binding.trailing {
                builder.extend_last_line(&format!(" {}", trailing));
            }
        }
        for comment in &self.brace_comments {
            Block::from_text(comment).render(builder);
        }
        builder.push_dedent();
        builder.push_line(&format!("}} from {}", tail));
    }

    /// Build the import as a string.
    pub fn to_source(&self, style: &Style) -> String {
        let mut builder = CodeBuilder::new(style.indent);
        self.render(&mut builder, style);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quote;

    fn build(import: &ImportDeclaration) -> String {
        import.to_source(&Style::default())
    }

    #[test]
    fn test_default_import() {
        let i = ImportDeclaration::new("swagger-jsdoc").default_binding("swaggerJSDoc");
        assert_eq!(build(&i), "import swaggerJSDoc from 'swagger-jsdoc';\n");
    }

    #[test]
    fn test_named_import() {
        let i = ImportDeclaration::new("@utils/logger")
            .named("logger")
            .named("stream");
        assert_eq!(build(&i), "import { logger, stream } from '@utils/logger';\n");
    }

    #[test]
    fn test_default_and_named_import() {
        let i = ImportDeclaration::new("express")
            .default_binding("express")
            .named("Router");
        assert_eq!(build(&i), "import express, { Router } from 'express';\n");
    }

    #[test]
    fn test_namespace_import() {
        let i = ImportDeclaration::new("path").namespace("path");
        assert_eq!(build(&i), "import * as path from 'path';\n");
    }

    #[test]
    fn test_type_only_import() {
        let i = ImportDeclaration::new("./types").named("Config").type_only();
        assert_eq!(build(&i), "import type { Config } from './types';\n");
    }

    #[test]
    fn test_side_effect_import() {
        let i = ImportDeclaration::new("reflect-metadata");
        assert_eq!(build(&i), "import 'reflect-metadata';\n");
    }

    #[test]
    fn test_aliased_binding() {
        let mut i = ImportDeclaration::new("./a");
        i.push_named(NamedImport::new("run").alias("start"));
        assert_eq!(build(&i), "import { run as start } from './a';\n");
        assert_eq!(i.named_imports()[0].local_name(), "start");
    }

    #[test]
    fn test_double_quote_style() {
        let style = Style {
            quote: Quote::Double,
            ..Style::default()
        };
        let i = ImportDeclaration::new("cors").default_binding("cors");
        assert_eq!(i.to_source(&style), "import cors from \"cors\";\n");
    }

    #[test]
    fn test_wide_import_breaks_per_binding() {
        let style = Style {
            print_width: 40,
            ..Style::default()
        };
        let i = ImportDeclaration::new("@config/env")
            .named("NODE_ENV")
            .named("PORT")
            .named("LOG_FORMAT");
        assert_eq!(
            i.to_source(&style),
            "import {\n  NODE_ENV,\n  PORT,\n  LOG_FORMAT,\n} from '@config/env';\n"
        );
    }

    #[test]
    fn test_require_import() {
        let mut i = ImportDeclaration::new("swagger-jsdoc").default_binding("swaggerJSDoc");
        i.require = true;
        assert_eq!(build(&i), "import swaggerJSDoc = require('swagger-jsdoc');\n");
    }

    #[test]
    fn test_commented_bindings_break_per_binding() {
        let mut port = NamedImport::new("PORT");
        port.comments.push("// server".into());
        port.trailing = Some("// default 3000".into());
        let mut i = ImportDeclaration::new("@config/env").named("NODE_ENV");
        i.push_named(port);
        i.brace_comments.push("/* more */".into());
        assert_eq!(
            build(&i),
            "import {\n  NODE_ENV,\n  // server\n  PORT, // default 3000\n  /* more */\n} from '@config/env';\n"
        );
    }

    #[test]
    fn test_binds() {
        let i = ImportDeclaration::new("@config/env").named("PORT");
        assert!(i.binds("PORT"));
        assert!(!i.binds("NODE_ENV"));
    }
}
