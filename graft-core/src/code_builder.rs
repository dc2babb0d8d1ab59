//! Code builder utility for writing properly indented code.

use crate::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for renderers that walk a tree.
///
/// # Example (Consuming API)
///
/// ```
/// use graft_core::CodeBuilder;
///
/// let code = CodeBuilder::typescript()
///     .line("function main() {")
///     .indent()
///     .line("console.log('hello');")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "function main() {\n  console.log('hello');\n}\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use graft_core::CodeBuilder;
///
/// let mut builder = CodeBuilder::typescript();
/// builder
///     .push_line("class App {")
///     .push_indent()
///     .push_line("listen() {}")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "class App {\n  listen() {}\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation (JS/TS default).
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    // Tree walkers use the `push_` methods.

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add text verbatim, without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Append `suffix` to the last written line, keeping its newline.
    ///
    /// Used to attach trailing comments and opening braces after a
    /// multi-line construct has already been emitted.
    pub fn extend_last_line(&mut self, suffix: &str) -> &mut Self {
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            self.buffer.push_str(suffix);
            self.buffer.push('\n');
        } else {
            self.buffer.push_str(suffix);
        }
        self
    }

    // Generators chain the consuming methods.

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a block with a closing line.
    ///
    /// # Example
    ///
    /// ```
    /// use graft_core::CodeBuilder;
    ///
    /// let code = CodeBuilder::typescript()
    ///     .block_with_close("info: {", "},", |b: CodeBuilder| {
    ///         b.line("title: 'REST API',")
    ///     })
    ///     .build();
    ///
    /// assert_eq!(code, "info: {\n  title: 'REST API',\n},\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Nesting depth of the next line.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Width of one indentation level.
    pub fn indent_unit(&self) -> Indent {
        self.indent
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_object_literal() {
        let code = CodeBuilder::typescript()
            .block_with_close("const options = {", "};", |b| {
                b.block_with_close("info: {", "},", |b| b.line("title: 'REST API',"))
                    .line("apis: ['swagger.yaml'],")
            })
            .build();

        assert_eq!(
            code,
            "const options = {\n  info: {\n    title: 'REST API',\n  },\n  apis: ['swagger.yaml'],\n};\n"
        );
    }

    #[test]
    fn test_four_space_indent() {
        let code = CodeBuilder::new(Indent::FOUR)
            .line("constructor() {")
            .indent()
            .line("this.initializeRoutes();")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "constructor() {\n    this.initializeRoutes();\n}\n");
    }

    #[test]
    fn test_blank_is_not_indented() {
        let code = CodeBuilder::typescript()
            .indent()
            .line("const specs = swaggerJSDoc(options);")
            .blank()
            .line("this.app.use(route);")
            .build();

        assert_eq!(
            code,
            "  const specs = swaggerJSDoc(options);\n\n  this.app.use(route);\n"
        );
    }

    #[test]
    fn test_when() {
        let build = |auth: bool| {
            CodeBuilder::typescript()
                .when(auth, |b| b.line("components: {},"))
                .line("apis: [],")
                .build()
        };

        assert_eq!(build(true), "components: {},\napis: [],\n");
        assert_eq!(build(false), "apis: [],\n");
    }

    #[test]
    fn test_trailing_comment_after_close() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line("class App {")
            .push_line("}")
            .extend_last_line(" // eslint-disable-line");
        assert_eq!(builder.build(), "class App {\n} // eslint-disable-line\n");
    }

    #[test]
    fn test_raw_keeps_template_text() {
        let mut builder = CodeBuilder::typescript();
        builder.push_indent().push_raw("    `literal`").push_blank();
        assert_eq!(builder.current_indent(), 1);
        assert_eq!(builder.build(), "    `literal`\n");
    }

    #[test]
    fn test_saturating_dedent() {
        let mut builder = CodeBuilder::typescript();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "x\n");
    }
}
