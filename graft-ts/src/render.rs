//! Canonical rendering of the document model.

use std::path::Path;

use graft_core::{CodeBuilder, File, WriteResult};
use tracing::info;

use crate::{
    Block, Error, Result, Style,
    model::{ClassDeclaration, ClassMember, Comment, ConstructorMember, Entry, Item, SourceDocument},
};

impl SourceDocument {
    /// Render the document in canonical form.
    ///
    /// Rendering is a fixed point: parsing the output and rendering it again
    /// yields the same text.
    pub fn render(&self, style: &Style) -> String {
        let mut builder = CodeBuilder::new(style.indent);
        render_entries(
            &mut builder,
            &self.items,
            &self.dangling,
            |prev, next| matches!(prev, Item::Import(_)) && !matches!(next, Item::Import(_)),
            |builder, item| render_item(builder, item, style),
        );
        builder.build()
    }

    /// Render the document and write it to `path` atomically.
    ///
    /// The file is left untouched when its content is already canonical.
    pub fn save(&self, path: &Path, style: &Style) -> Result<WriteResult> {
        let result = File::new(path, self.render(style))
            .write()
            .map_err(|source| {
                Box::new(Error::Write {
                    path: path.to_path_buf(),
                    source,
                })
            })?;
        if result == WriteResult::Written {
            info!(path = %path.display(), "wrote source document");
        }
        Ok(result)
    }
}

/// Render the children of one container.
///
/// `separate` forces a blank line between two adjacent nodes. Blank lines
/// are never emitted before the first line of a container.
fn render_entries<T>(
    builder: &mut CodeBuilder,
    entries: &[Entry<T>],
    dangling: &[Comment],
    separate: impl Fn(&T, &T) -> bool,
    render_node: impl Fn(&mut CodeBuilder, &T),
) {
    let mut emitted = false;
    let mut prev: Option<&T> = None;

    for entry in entries {
        let mut forced = prev.is_some_and(|p| separate(p, &entry.node));
        for comment in &entry.comments {
            if emitted && (comment.blank_before || forced) {
                builder.push_blank();
            }
            forced = false;
            comment.text.render(builder);
            emitted = true;
        }

        if emitted && (entry.blank_before || forced) {
            builder.push_blank();
        }
        render_node(builder, &entry.node);
        if let Some(trailing) = &entry.trailing {
            builder.extend_last_line(&format!(" {}", trailing));
        }
        emitted = true;
        prev = Some(&entry.node);
    }

    for comment in dangling {
        if emitted && comment.blank_before {
            builder.push_blank();
        }
        comment.text.render(builder);
        emitted = true;
    }
}

fn render_item(builder: &mut CodeBuilder, item: &Item, style: &Style) {
    match item {
        Item::Import(import) => import.render(builder, style),
        Item::Class(class) => render_class(builder, class),
        Item::Other(block) => block.render(builder),
    }
}

fn render_class(builder: &mut CodeBuilder, class: &ClassDeclaration) {
    let empty = class.members.is_empty() && class.dangling.is_empty();
    render_braced(builder, &class.header, class.brace_comment.as_deref(), empty, |builder| {
        render_entries(
            builder,
            &class.members,
            &class.dangling,
            |_, _| false,
            render_member,
        );
    });
}

fn render_member(builder: &mut CodeBuilder, member: &ClassMember) {
    match member {
        ClassMember::Constructor(ctor) => render_constructor(builder, ctor),
        ClassMember::Method(method) => render_braced(
            builder,
            &method.head,
            method.brace_comment.as_deref(),
            method.body.is_empty(),
            |builder| method.body.render(builder),
        ),
        ClassMember::Other(block) => block.render(builder),
    }
}

fn render_constructor(builder: &mut CodeBuilder, ctor: &ConstructorMember) {
    let empty = ctor.statements.is_empty() && ctor.dangling.is_empty();
    render_braced(builder, &ctor.head, ctor.brace_comment.as_deref(), empty, |builder| {
        render_entries(
            builder,
            &ctor.statements,
            &ctor.dangling,
            |_, _| false,
            |builder, statement| statement.text.render(builder),
        );
    });
}

/// Render `head { ... }`, or `head {}` when there is no body.
///
/// `comment` goes after the opening brace, where a line comment cannot
/// swallow it.
fn render_braced(
    builder: &mut CodeBuilder,
    head: &Block,
    comment: Option<&str>,
    empty: bool,
    body: impl FnOnce(&mut CodeBuilder),
) {
    head.render_open(builder, if empty { " {}" } else { " {" });
    if let Some(comment) = comment {
        builder.extend_last_line(&format!(" {}", comment));
    }
    if empty {
        return;
    }
    builder.push_indent();
    body(builder);
    builder.push_dedent();
    builder.push_line("}");
}
