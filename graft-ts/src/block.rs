//! Opaque multi-line source fragments.
//!
//! A [`Block`] stores the text of a construct graft does not need to
//! understand (a method body, a property, a statement) as dedented lines, so
//! it can be re-emitted at any nesting depth with canonical indentation.
//! Nesting is measured in the source's own indent unit and re-emitted in the
//! output's.

use std::{collections::BTreeMap, ops::Range};

use graft_core::CodeBuilder;

/// Columns a tab counts for when measuring indentation.
const TAB_WIDTH: usize = 2;

/// Indent unit assumed for text without any nesting.
const DEFAULT_UNIT: usize = 2;

/// One line of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Code line nested `depth` levels below the block's base indentation,
    /// plus `offset` columns that do not make up a whole level (JSDoc `*`
    /// alignment, continuation lines).
    Code {
        depth: usize,
        offset: usize,
        text: String,
    },
    /// Line that starts inside a template literal; emitted byte for byte.
    Literal(String),
    /// Empty line.
    Blank,
}

/// Dedented multi-line text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    lines: Vec<Line>,
}

enum RawLine {
    Code { indent: Option<usize>, text: String },
    Literal(String),
    Blank,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from generated text.
    ///
    /// Indentation is measured relative to the least-indented line, so the
    /// text can be written at any depth. The indent unit is detected from the
    /// text itself.
    pub fn from_text(text: &str) -> Self {
        Self::from_range(text, 0..text.len(), &[], indent_unit(text, &[]))
    }

    /// Build a block from `source[range]`.
    ///
    /// `literals` are byte ranges of template literals: lines starting inside
    /// one are kept verbatim and lines ending inside one keep their trailing
    /// whitespace. Leading and trailing blank lines are dropped and runs of
    /// blank lines collapse to one. `unit` is the source's indent unit in
    /// columns.
    pub(crate) fn from_range(
        source: &str,
        range: Range<usize>,
        literals: &[Range<usize>],
        unit: usize,
    ) -> Self {
        let unit = unit.max(1);
        let inside = |offset: usize| literals.iter().any(|r| r.start < offset && offset < r.end);

        let mut raw = Vec::new();
        let mut offset = range.start;
        for (idx, segment) in source[range.clone()].split('\n').enumerate() {
            let start = offset;
            offset += segment.len() + 1;
            let segment = segment.strip_suffix('\r').unwrap_or(segment);

            if idx > 0 && inside(start) {
                raw.push(RawLine::Literal(segment.to_string()));
                continue;
            }

            let body = segment.trim_start_matches([' ', '\t']);
            let lead = &segment[..segment.len() - body.len()];
            let text = if inside(start + segment.len()) {
                body
            } else {
                body.trim_end()
            };
            if text.is_empty() {
                raw.push(RawLine::Blank);
                continue;
            }

            let indent = if idx == 0 {
                let line_start = source[..start].rfind('\n').map_or(0, |p| p + 1);
                let prefix = &source[line_start..start];
                prefix
                    .chars()
                    .all(|c| c == ' ' || c == '\t')
                    .then(|| width(prefix) + width(lead))
            } else {
                Some(width(lead))
            };
            raw.push(RawLine::Code {
                indent,
                text: text.to_string(),
            });
        }

        let common = raw
            .iter()
            .filter_map(|line| match line {
                RawLine::Code { indent, .. } => *indent,
                _ => None,
            })
            .min()
            .unwrap_or(0);

        let mut lines: Vec<Line> = Vec::with_capacity(raw.len());
        for line in raw {
            let line = match line {
                RawLine::Code { indent, text } => {
                    let relative = indent.map_or(0, |i| i - common);
                    Line::Code {
                        depth: relative / unit,
                        offset: relative % unit,
                        text,
                    }
                }
                RawLine::Literal(text) => Line::Literal(text),
                RawLine::Blank => Line::Blank,
            };
            if line == Line::Blank && matches!(lines.last(), None | Some(Line::Blank)) {
                continue;
            }
            lines.push(line);
        }
        while lines.last() == Some(&Line::Blank) {
            lines.pop();
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the first code line.
    pub fn first_line(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Code { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Render the block at the builder's current depth.
    pub(crate) fn render(&self, builder: &mut CodeBuilder) {
        let unit = builder.indent_unit().width();
        for line in &self.lines {
            match line {
                Line::Code {
                    depth,
                    offset,
                    text,
                } => {
                    let indent = depth * unit + offset;
                    builder.push_line(&format!("{}{}", " ".repeat(indent), text));
                }
                Line::Literal(text) => {
                    builder.push_raw(text).push_blank();
                }
                Line::Blank => {
                    builder.push_blank();
                }
            }
        }
    }

    /// Render the block and append `suffix` (e.g. `" {"`) to its last line.
    pub(crate) fn render_open(&self, builder: &mut CodeBuilder, suffix: &str) {
        if self.is_empty() {
            builder.push_line(suffix.trim_start());
        } else {
            self.render(builder);
            builder.extend_last_line(suffix);
        }
    }
}

/// Most common indentation step between consecutive code lines of `source`.
///
/// Lines starting inside template literals and comment continuation lines
/// (`* ...`) do not count.
pub(crate) fn indent_unit(source: &str, literals: &[Range<usize>]) -> usize {
    let inside = |offset: usize| literals.iter().any(|r| r.start < offset && offset < r.end);

    let mut steps: BTreeMap<usize, usize> = BTreeMap::new();
    let mut previous: Option<usize> = None;
    let mut offset = 0;
    for line in source.split('\n') {
        let start = offset;
        offset += line.len() + 1;
        let body = line.trim_start_matches([' ', '\t']);
        if inside(start) || body.trim_end().is_empty() || body.starts_with('*') {
            continue;
        }
        let indent = width(&line[..line.len() - body.len()]);
        if let Some(prev) = previous
            && indent > prev
        {
            *steps.entry(indent - prev).or_default() += 1;
        }
        previous = Some(indent);
    }

    // ties go to the smaller step
    steps
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map_or(DEFAULT_UNIT, |(step, _)| step)
}

fn width(s: &str) -> usize {
    s.chars().map(|c| if c == '\t' { TAB_WIDTH } else { 1 }).sum()
}

#[cfg(test)]
mod tests {
    use graft_core::Indent;

    use super::*;

    fn code(depth: usize, text: &str) -> Line {
        Line::Code {
            depth,
            offset: 0,
            text: text.into(),
        }
    }

    fn render(block: &Block, depth: usize) -> String {
        render_with(block, depth, Indent::TYPESCRIPT)
    }

    fn render_with(block: &Block, depth: usize, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);
        for _ in 0..depth {
            builder.push_indent();
        }
        block.render(&mut builder);
        builder.build()
    }

    #[test]
    fn test_from_text_dedents() {
        let block = Block::from_text("    if (a) {\n      b();\n    }\n");
        assert_eq!(
            block.lines(),
            &[code(0, "if (a) {"), code(1, "b();"), code(0, "}")]
        );
    }

    #[test]
    fn test_render_reindents() {
        let block = Block::from_text("if (a) {\n\tb();   \n}");
        assert_eq!(render(&block, 2), "    if (a) {\n      b();\n    }\n");
    }

    #[test]
    fn test_blank_runs_collapse_and_edges_trim() {
        let block = Block::from_text("\n\na();\n\n\n\nb();\n\n");
        assert_eq!(render(&block, 0), "a();\n\nb();\n");
    }

    #[test]
    fn test_first_line_measures_source_column() {
        let source = "class A {\n    foo() {\n      x();\n    }\n}";
        let start = source.find("foo").unwrap();
        let end = source.rfind("    }").unwrap() + 5;
        let block = Block::from_range(source, start..end, &[], 2);
        assert_eq!(render(&block, 1), "  foo() {\n    x();\n  }\n");
    }

    #[test]
    fn test_template_literal_lines_are_verbatim() {
        let source = "log(`a\n      b   \nc`);";
        let literal = source.find('`').unwrap()..source.rfind('`').unwrap() + 1;
        let block = Block::from_range(source, 0..source.len(), &[literal], 2);
        assert_eq!(
            block.lines(),
            &[
                code(0, "log(`a"),
                Line::Literal("      b   ".into()),
                Line::Literal("c`);".into()),
            ]
        );
        assert_eq!(render(&block, 1), "  log(`a\n      b   \nc`);\n");
    }

    #[test]
    fn test_nesting_follows_output_indent() {
        let four = Block::from_text("if (a) {\n    if (b) {\n        c();\n    }\n}");
        assert_eq!(
            render(&four, 0),
            "if (a) {\n  if (b) {\n    c();\n  }\n}\n"
        );

        let two = Block::from_text("if (a) {\n  c();\n}");
        assert_eq!(render_with(&two, 1, Indent::FOUR), "    if (a) {\n        c();\n    }\n");
    }

    #[test]
    fn test_partial_levels_are_kept() {
        let block = Block::from_text("/**\n * Docs.\n */\nrun(a,\n    b);");
        assert_eq!(
            render_with(&block, 0, Indent::FOUR),
            "/**\n * Docs.\n */\nrun(a,\n    b);\n"
        );
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(indent_unit("a {\n    b {\n        c;\n    }\n}\n", &[]), 4);
        assert_eq!(indent_unit("a {\n\tb;\n}\n", &[]), 2);
        assert_eq!(indent_unit("flat();\nflat();\n", &[]), DEFAULT_UNIT);
        // JSDoc alignment is not a nesting level
        assert_eq!(indent_unit("  /**\n   * x\n   */\n  a {\n      b;\n  }\n", &[]), 4);
    }

    #[test]
    fn test_render_is_stable() {
        let block = Block::from_text("const o = {\n  a: 1,\n};\n\nrun(o);");
        let once = render(&block, 2);
        let again = render(&Block::from_text(&once), 2);
        assert_eq!(once, again);
    }

    #[test]
    fn test_render_open() {
        let mut builder = CodeBuilder::typescript();
        Block::from_text("private run()").render_open(&mut builder, " {");
        assert_eq!(builder.build(), "private run() {\n");
    }
}
