//! Lowering of a tree-sitter syntax tree into the document model.

use std::{ops::Range, path::Path};

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::{
    Block, Error, Result,
    block::indent_unit,
    model::{
        CallTarget, ClassDeclaration, ClassMember, Comment, ConstructorMember, Entry,
        ImportDeclaration, Item, MethodMember, NamedImport, SourceDocument, Statement, Visibility,
    },
};

fn parse_tree(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| {
            Box::new(Error::Language {
                message: e.to_string(),
            })
        })?;
    parser.parse(source, None).ok_or_else(|| {
        Box::new(Error::Language {
            message: "parser produced no syntax tree".to_string(),
        })
    })
}

/// First ERROR or MISSING node in document order.
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Byte ranges of every template literal in the tree.
fn literal_ranges(root: Node<'_>) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "template_string" {
            ranges.push(node.byte_range());
            continue;
        }
        stack.extend(node.children(&mut cursor));
    }
    ranges
}

impl SourceDocument {
    /// Parse TypeScript source text.
    ///
    /// `name` identifies the source in diagnostics. Any syntax error fails the
    /// parse with a span pointing at the first error.
    pub fn parse(source: &str, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let tree = parse_tree(source)?;
        let root = tree.root_node();

        if let Some(bad) = first_error(root) {
            let kind = if bad.is_missing() {
                format!("missing `{}`", bad.kind())
            } else {
                "syntax error".to_string()
            };
            let len = (bad.end_byte() - bad.start_byte()).max(1);
            let start = bad.start_byte().min(source.len().saturating_sub(1));
            return Err(Error::parse(source, &name, (start, len), kind));
        }

        let literals = literal_ranges(root);
        let lowering = Lowering {
            src: source,
            unit: indent_unit(source, &literals),
            literals,
        };
        let children = lowering.entries(root, None, Lowering::item);
        debug!(name = %name, items = children.entries.len(), unit = lowering.unit, "parsed source document");

        Ok(Self {
            name,
            items: children.entries,
            dangling: children.dangling,
        })
    }

    /// Load and parse a file, returning `None` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let source = graft_core::read_if_exists(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        match source {
            Some(source) => Self::parse(&source, path.display().to_string()).map(Some),
            None => Ok(None),
        }
    }
}

struct Lowering<'s> {
    src: &'s str,
    literals: Vec<Range<usize>>,
    /// Indent unit of the source, in columns.
    unit: usize,
}

/// Lowered children of a container.
struct Children<T> {
    entries: Vec<Entry<T>>,
    dangling: Vec<Comment>,
    /// Comment on the line of the container's opening brace, before any child.
    opening: Option<String>,
}

/// A container child, with its end cut before any comments tree-sitter
/// folded into it.
#[derive(Clone, Copy)]
enum Piece<'t> {
    Node {
        node: Node<'t>,
        end: usize,
        end_row: usize,
    },
    Token(Node<'t>),
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.src[node.byte_range()]
    }

    fn block(&self, range: Range<usize>) -> Block {
        Block::from_range(self.src, range, &self.literals, self.unit)
    }

    /// Split the children of `container` into entries with attached trivia.
    ///
    /// `open_row` is the row of the container's opening brace, if any; only
    /// children before the closing brace belong to the container. Decorators
    /// are folded into the member that follows them, and a `;` or `,` token
    /// directly after a member is folded into that member.
    fn entries<'t, T>(
        &self,
        container: Node<'t>,
        open_row: Option<usize>,
        convert: impl Fn(&Self, Node<'t>, Range<usize>) -> T,
    ) -> Children<T> {
        let mut cursor = container.walk();
        let mut children: Vec<Node<'t>> = container.children(&mut cursor).collect();
        if open_row.is_some()
            && let Some(close) = children.iter().rposition(|c| c.kind() == "}")
        {
            children.truncate(close);
        }
        let pieces = flatten(children);

        let mut entries: Vec<Entry<T>> = Vec::new();
        let mut comments: Vec<Comment> = Vec::new();
        let mut opening: Option<String> = None;
        let mut last_row = open_row;
        let mut last_entry_row: Option<usize> = None;
        let mut decorator_start: Option<(usize, usize)> = None;

        let gap = |last: Option<usize>, row: usize| last.is_some_and(|r| row > r + 1);

        let mut i = 0;
        while i < pieces.len() {
            let piece = &pieces[i];
            i += 1;
            match *piece {
                Piece::Token(child) if matches!(child.kind(), "comment" | "hash_bang_line") => {
                    let row = child.start_position().row;
                    let single_line = child.end_position().row == row;
                    let text = self.text(child).trim();
                    let trails = single_line
                        && comments.is_empty()
                        && decorator_start.is_none()
                        && last_entry_row == Some(row);
                    match entries.last_mut() {
                        Some(entry) if trails && entry.trailing.is_none() => {
                            entry.trailing = Some(text.to_string());
                        }
                        None if single_line
                            && comments.is_empty()
                            && opening.is_none()
                            && decorator_start.is_none()
                            && open_row == Some(row) =>
                        {
                            opening = Some(text.to_string());
                        }
                        _ => {
                            comments.push(Comment {
                                blank_before: gap(last_row, row),
                                text: self.block(child.byte_range()),
                            });
                            last_entry_row = None;
                        }
                    }
                    last_row = Some(child.end_position().row);
                }
                Piece::Token(child) if child.kind() == "decorator" => {
                    decorator_start.get_or_insert((child.start_byte(), child.start_position().row));
                }
                Piece::Token(_) => {}
                Piece::Node {
                    node,
                    mut end,
                    mut end_row,
                } => {
                    let (start, start_row) = decorator_start
                        .take()
                        .unwrap_or((node.start_byte(), node.start_position().row));
                    if let Some(Piece::Token(next)) = pieces.get(i)
                        && !next.is_named()
                        && matches!(next.kind(), ";" | ",")
                        && end == node.end_byte()
                    {
                        end = next.end_byte();
                        end_row = next.end_position().row;
                        i += 1;
                    }

                    entries.push(Entry {
                        comments: std::mem::take(&mut comments),
                        blank_before: gap(last_row, start_row),
                        node: convert(self, node, start..end),
                        trailing: None,
                    });
                    last_row = Some(end_row);
                    last_entry_row = Some(end_row);
                }
            }
        }

        Children {
            entries,
            dangling: comments,
            opening,
        }
    }

    fn item(&self, node: Node<'_>, range: Range<usize>) -> Item {
        match node.kind() {
            "import_statement" => self
                .import(node, range.clone())
                .map(Item::Import)
                .unwrap_or_else(|| Item::Other(self.block(range))),
            "class_declaration" | "abstract_class_declaration" => self
                .class(node, range.start)
                .map(Item::Class)
                .unwrap_or_else(|| Item::Other(self.block(range))),
            "export_statement" => node
                .child_by_field_name("declaration")
                .or_else(|| node.child_by_field_name("value"))
                .filter(|d| {
                    matches!(
                        d.kind(),
                        "class_declaration" | "abstract_class_declaration" | "class"
                    )
                })
                .and_then(|d| self.class(d, range.start))
                .map(Item::Class)
                .unwrap_or_else(|| Item::Other(self.block(range))),
            _ => Item::Other(self.block(range)),
        }
    }

    /// Lower an import. Imports whose shape or comments cannot be rendered
    /// from the model keep their source text and their specifier.
    fn import(&self, node: Node<'_>, range: Range<usize>) -> Option<ImportDeclaration> {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        let require = children
            .iter()
            .find(|c| c.kind() == "import_require_clause")
            .copied();
        let source = node
            .child_by_field_name("source")
            .or_else(|| require.and_then(|r| r.child_by_field_name("source")))?;
        let raw = self.text(source);
        let specifier = raw.get(1..raw.len().saturating_sub(1))?.to_string();
        let mut import = ImportDeclaration::new(specifier);

        let mut structured = true;
        for child in children {
            match child.kind() {
                "type" if !child.is_named() => import.type_only = true,
                "import_clause" => structured &= self.import_clause(child, &mut import).is_some(),
                "import_require_clause" => {
                    let mut inner = child.walk();
                    let name = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "identifier");
                    import.default = name.map(|n| self.text(n).to_string());
                    import.require = true;
                }
                "import_attribute" => import.attributes = Some(self.text(child).to_string()),
                _ => {}
            }
        }
        if !structured || stray_comment(node, range.end) {
            import.verbatim = Some(self.block(range));
        }
        Some(import)
    }

    fn import_clause(&self, clause: Node<'_>, import: &mut ImportDeclaration) -> Option<()> {
        let mut cursor = clause.walk();
        for child in clause.children(&mut cursor) {
            match child.kind() {
                "identifier" => import.default = Some(self.text(child).to_string()),
                "namespace_import" => {
                    let mut inner = child.walk();
                    let name = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "identifier")?;
                    import.namespace = Some(self.text(name).to_string());
                }
                "named_imports" => self.named_imports(child, import)?,
                "," | "type" | "comment" => {}
                _ if child.is_named() => return None,
                _ => {}
            }
        }
        Some(())
    }

    /// Lower `{ ... }` bindings with the comments between them.
    fn named_imports(&self, list: Node<'_>, import: &mut ImportDeclaration) -> Option<()> {
        let mut cursor = list.walk();
        let mut comments: Vec<String> = Vec::new();
        // row the previous binding (or its comma) ended on
        let mut last_row: Option<usize> = None;
        for part in list.children(&mut cursor) {
            match part.kind() {
                "import_specifier" => {
                    let mut named = self.import_specifier(part)?;
                    named.comments = std::mem::take(&mut comments);
                    import.named.push(named);
                    last_row = Some(part.end_position().row);
                }
                "," => last_row = last_row.map(|_| part.end_position().row),
                "comment" => {
                    let row = part.start_position().row;
                    let text = self.text(part).trim().to_string();
                    match import.named.last_mut() {
                        Some(prev)
                            if comments.is_empty()
                                && prev.trailing.is_none()
                                && last_row == Some(row)
                                && part.end_position().row == row =>
                        {
                            prev.trailing = Some(text);
                        }
                        _ => comments.push(text),
                    }
                }
                _ => {}
            }
        }
        import.brace_comments = comments;
        Some(())
    }

    fn import_specifier(&self, spec: Node<'_>) -> Option<NamedImport> {
        let name = self.text(spec.child_by_field_name("name")?).to_string();
        let alias = spec
            .child_by_field_name("alias")
            .map(|a| self.text(a).to_string());
        let mut cursor = spec.walk();
        let type_only = spec
            .children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == "type");
        let mut named = NamedImport::new(name);
        named.alias = alias;
        named.type_only = type_only;
        Some(named)
    }

    fn class(&self, node: Node<'_>, header_start: usize) -> Option<ClassDeclaration> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        let body = node.child_by_field_name("body")?;
        let (header, header_comment) = self.head(node, header_start..body.start_byte());
        let children = self.entries(body, Some(body.start_position().row), Lowering::member);

        Some(ClassDeclaration {
            name,
            header,
            brace_comment: join_comments(header_comment, children.opening),
            members: children.entries,
            dangling: children.dangling,
        })
    }

    /// Lower the text before a body's opening brace.
    ///
    /// Line comments that end the text are split off and returned, so the
    /// brace can follow the code instead of landing inside a comment.
    fn head(&self, node: Node<'_>, range: Range<usize>) -> (Block, Option<String>) {
        let trimmed_end = |to: usize| range.start + self.src[range.start..to].trim_end().len();
        let mut end = trimmed_end(range.end);
        let mut comments = Vec::new();
        while end > range.start {
            let Some(last) = node.descendant_for_byte_range(end - 1, end) else {
                break;
            };
            let text = self.text(last);
            if last.kind() != "comment" || !text.starts_with("//") || last.start_byte() < range.start {
                break;
            }
            comments.push(text.trim().to_string());
            end = trimmed_end(last.start_byte());
        }
        comments.reverse();
        let comment = (!comments.is_empty()).then(|| comments.join(" "));
        (self.block(range.start..end), comment)
    }

    fn member(&self, node: Node<'_>, range: Range<usize>) -> ClassMember {
        if node.kind() == "method_definition"
            && let Some(member) = self.method(node, range.start)
        {
            return member;
        }
        ClassMember::Other(self.block(range))
    }

    fn method(&self, node: Node<'_>, start: usize) -> Option<ClassMember> {
        let body = node.child_by_field_name("body")?;
        let name_node = node.child_by_field_name("name")?;
        if !matches!(
            name_node.kind(),
            "property_identifier" | "private_property_identifier"
        ) {
            return None;
        }

        let mut visibility = None;
        let mut is_static = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "accessibility_modifier" => {
                    visibility = Visibility::from_keyword(self.text(child).trim());
                }
                "static" => is_static = true,
                // accessors are not methods
                "get" | "set" if !child.is_named() && child.end_byte() <= name_node.start_byte() => {
                    return None;
                }
                _ => {}
            }
        }

        let name = self.text(name_node).to_string();
        let (head, head_comment) = self.head(node, start..body.start_byte());

        if name == "constructor" && !is_static {
            let children = self.entries(body, Some(body.start_position().row), Lowering::statement);
            return Some(ClassMember::Constructor(ConstructorMember {
                head,
                brace_comment: join_comments(head_comment, children.opening),
                statements: children.entries,
                dangling: children.dangling,
            }));
        }

        let (open, close) = braces(body)?;
        let mut body_start = open.end_byte();
        let mut opening = None;
        if let Some(next) = open.next_sibling()
            && next.kind() == "comment"
            && next.end_byte() <= close.start_byte()
            && next.start_position().row == open.end_position().row
            && next.end_position().row == open.end_position().row
        {
            opening = Some(self.text(next).trim().to_string());
            body_start = next.end_byte();
        }

        Some(ClassMember::Method(MethodMember {
            name,
            visibility,
            is_static,
            head,
            brace_comment: join_comments(head_comment, opening),
            body: self.block(body_start..close.start_byte()),
        }))
    }

    fn statement(&self, node: Node<'_>, range: Range<usize>) -> Statement {
        Statement {
            text: self.block(range),
            call: call_target(node, self.src),
        }
    }
}

/// Flatten container children, moving comments that tree-sitter attached
/// to the tail of a child out after it.
fn flatten<'t>(children: Vec<Node<'t>>) -> Vec<Piece<'t>> {
    let mut pieces = Vec::with_capacity(children.len());
    for child in children {
        if !child.is_named() || matches!(child.kind(), "comment" | "hash_bang_line" | "decorator") {
            pieces.push(Piece::Token(child));
            continue;
        }
        let (end, end_row, spilled) = overhang(child);
        pieces.push(Piece::Node {
            node: child,
            end,
            end_row,
        });
        pieces.extend(spilled.into_iter().map(Piece::Token));
    }
    pieces
}

/// Opening and closing brace tokens of a `{ ... }` node.
fn braces<'t>(node: Node<'t>) -> Option<(Node<'t>, Node<'t>)> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    let open = children.iter().find(|c| c.kind() == "{")?;
    let close = children.iter().rfind(|c| c.kind() == "}")?;
    Some((*open, *close))
}

/// Comments tree-sitter attached to the end of `node`, after its last
/// token, in source order, together with the byte and row that token ends
/// on.
fn overhang<'t>(node: Node<'t>) -> (usize, usize, Vec<Node<'t>>) {
    let mut end = node.end_byte();
    let mut end_row = node.end_position().row;
    let mut spilled: Vec<Node<'t>> = Vec::new();

    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let children: Vec<Node<'t>> = current.children(&mut cursor).collect();
        let Some(code) = children.iter().rposition(|c| c.kind() != "comment") else {
            break;
        };
        let tail = &children[code + 1..];
        if !tail.is_empty() {
            // inner tails come first in the source
            spilled.splice(0..0, tail.iter().copied());
            end = children[code].end_byte();
            end_row = children[code].end_position().row;
        }
        current = children[code];
    }
    (end, end_row, spilled)
}

/// Whether an import holds a comment before `end` outside its `{ ... }`
/// bindings.
fn stray_comment(node: Node<'_>, end: usize) -> bool {
    let mut cursor = node.walk();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        for child in current.children(&mut cursor) {
            if child.kind() == "comment" {
                if current.kind() != "named_imports" && child.start_byte() < end {
                    return true;
                }
            } else {
                stack.push(child);
            }
        }
    }
    false
}

fn join_comments(first: Option<String>, second: Option<String>) -> Option<String> {
    match (first, second) {
        (Some(a), Some(b)) => Some(format!("{} {}", a, b)),
        (a, b) => a.or(b),
    }
}

/// Recognize `this.<name>(...)` and `await this.<name>(...)` statements.
fn call_target(node: Node<'_>, src: &str) -> Option<CallTarget> {
    if node.kind() != "expression_statement" {
        return None;
    }
    let mut cursor = node.walk();
    let mut expr = node.named_children(&mut cursor).next()?;
    if expr.kind() == "await_expression" {
        let mut inner = expr.walk();
        expr = expr.named_children(&mut inner).next()?;
    }
    if expr.kind() != "call_expression" {
        return None;
    }
    let function = expr.child_by_field_name("function")?;
    if function.kind() != "member_expression" {
        return None;
    }
    let object = function.child_by_field_name("object")?;
    let property = function.child_by_field_name("property")?;
    if object.kind() != "this" || property.kind() != "property_identifier" {
        return None;
    }
    Some(CallTarget::Method(src[property.byte_range()].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SourceDocument {
        SourceDocument::parse(source, "app.ts").expect("source should parse")
    }

    #[test]
    fn test_imports_are_structured() {
        let doc = parse(
            "import morgan from 'morgan';\nimport { a, type B, c as d } from \"./x\";\nimport * as path from 'path';\n",
        );
        let imports: Vec<_> = doc.imports().collect();
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].default_name(), Some("morgan"));
        assert_eq!(imports[1].specifier(), "./x");
        assert_eq!(imports[1].named_imports().len(), 3);
        assert!(imports[1].named_imports()[1].type_only);
        assert_eq!(imports[1].named_imports()[2].local_name(), "d");
        assert_eq!(imports[2].namespace_name(), Some("path"));
    }

    #[test]
    fn test_class_members() {
        let doc = parse(
            r#"class App {
  public port: number;

  constructor(routes: string[], apiPrefix = '/api/v1') {
    this.port = 3000;
    this.initializeRoutes(routes, apiPrefix);
    await this.initializeErrorHandling();
  }

  get url() {
    return '';
  }

  private initializeRoutes(routes: string[], apiPrefix: string) {
    routes.forEach(r => r);
  }

  public static create() {
    return new App([]);
  }
}
"#,
        );
        let class = doc.class("App").expect("class App");
        assert_eq!(class.members().len(), 5);
        assert!(matches!(class.members()[0].node, ClassMember::Other(_)));
        assert!(matches!(class.members()[2].node, ClassMember::Other(_)));

        let methods: Vec<_> = class.methods().map(|m| m.name()).collect();
        assert_eq!(methods, ["initializeRoutes", "create"]);
        let routes = class.method("initializeRoutes").unwrap();
        assert_eq!(routes.visibility(), Some(Visibility::Private));
        assert!(class.method("create").unwrap().is_static());

        let ctor = class.constructor().expect("constructor");
        let calls: Vec<_> = ctor
            .statements()
            .iter()
            .map(|s| s.node.call().map(|c| c.method_name().to_string()))
            .collect();
        assert_eq!(
            calls,
            [
                None,
                Some("initializeRoutes".to_string()),
                Some("initializeErrorHandling".to_string())
            ]
        );
    }

    #[test]
    fn test_call_target_ignores_comments_and_strings() {
        let doc = parse(
            r#"class App {
  constructor() {
    // this.initializeSwagger(apiPrefix);
    log('this.initializeSwagger(apiPrefix)');
    this.app.initializeSwagger();
  }
}
"#,
        );
        let ctor = doc.class("App").unwrap().constructor().unwrap();
        assert!(!ctor.calls("initializeSwagger"));
        assert_eq!(ctor.statements().len(), 2);
        assert_eq!(ctor.statements()[0].comments.len(), 1);
    }

    #[test]
    fn test_exported_class() {
        let doc = parse("export default class Server {\n  start() {}\n}\n");
        let class = doc.class("Server").expect("exported class");
        assert_eq!(class.header().first_line(), Some("export default class Server"));
        assert!(class.method("start").is_some());
    }

    #[test]
    fn test_trailing_and_leading_comments() {
        let doc = parse("// header\n\nimport a from 'a'; // keep\nconst x = 1;\n// end\n");
        let first = &doc.items()[0];
        assert_eq!(first.comments.len(), 1);
        assert!(first.blank_before);
        assert_eq!(first.trailing.as_deref(), Some("// keep"));
        assert_eq!(doc.dangling_comments().len(), 1);
    }

    #[test]
    fn test_comments_after_closing_braces_trail_their_owner() {
        let doc = parse(
            "class App {\n  constructor() {\n    this.run();\n  } // ctor\n  run() {\n    go();\n  } // routes\n} // App\n",
        );
        assert_eq!(doc.items()[0].trailing.as_deref(), Some("// App"));
        assert!(doc.dangling_comments().is_empty());

        let class = doc.class("App").unwrap();
        let trailing: Vec<_> = class.members().iter().map(|m| m.trailing.as_deref()).collect();
        assert_eq!(trailing, [Some("// ctor"), Some("// routes")]);
        assert_eq!(class.constructor().unwrap().statements().len(), 1);
        let body = class.method("run").unwrap().body();
        assert_eq!(body.lines().len(), 1);
        assert_eq!(body.first_line(), Some("go();"));
    }

    #[test]
    fn test_comments_around_opening_braces() {
        let doc = parse(
            "class App // main app\n{\n  private run() // todo\n  {\n    go();\n  }\n  stop() { // soon\n  }\n}\n",
        );
        let class = doc.class("App").unwrap();
        assert_eq!(class.header().first_line(), Some("class App"));
        assert_eq!(class.brace_comment(), Some("// main app"));

        let run = class.method("run").unwrap();
        assert_eq!(run.head().first_line(), Some("private run()"));
        assert_eq!(run.brace_comment(), Some("// todo"));
        let stop = class.method("stop").unwrap();
        assert_eq!(stop.brace_comment(), Some("// soon"));
        assert!(stop.body().is_empty());
    }

    #[test]
    fn test_unusual_imports_keep_their_specifier() {
        let doc = parse(
            "import x = require('x');\nimport {\n  a, // first\n  // second\n  b,\n} from 'ab';\nimport /* c */ c from 'c';\n",
        );
        let imports: Vec<_> = doc.imports().collect();
        let specifiers: Vec<_> = imports.iter().map(|i| i.specifier()).collect();
        assert_eq!(specifiers, ["x", "ab", "c"]);

        assert!(imports[0].is_require());
        assert_eq!(imports[0].default_name(), Some("x"));

        let named = imports[1].named_imports();
        assert_eq!(named[0].trailing.as_deref(), Some("// first"));
        assert_eq!(named[1].comments, ["// second"]);
        assert!(!imports[1].is_verbatim());

        assert!(imports[2].is_verbatim());
        assert_eq!(imports[2].default_name(), Some("c"));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = SourceDocument::parse("class App {\n  foo( {\n}\n", "broken.ts").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded = SourceDocument::load(&temp.path().join("src/app.ts")).unwrap();
        assert!(loaded.is_none());
    }
}
