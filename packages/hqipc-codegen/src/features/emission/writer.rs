//! Indenting source writer.
//!
//! Minimal helper for rendering brace-scoped Rust text: `open` writes a
//! header and pushes one indent level, `close` pops it and writes the
//! closing brace. Four spaces per level.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One indented line.
    pub fn line(&mut self, contents: &str) {
        for _ in 0..self.indent {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(contents);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// `header {` and one level deeper.
    pub fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
    }

    /// `header{` with no separating space, for call-style scopes like
    /// `gate.register_func({`.
    pub fn open_call(&mut self, header: &str) {
        self.line(&format!("{header}{{"));
        self.indent += 1;
    }

    /// Closes the innermost scope with `}`.
    pub fn close(&mut self) {
        self.close_with("}");
    }

    /// Closes the innermost scope with a custom terminator, e.g. `});`.
    pub fn close_with(&mut self, terminator: &str) {
        debug_assert!(self.indent > 0, "unbalanced scope close");
        self.indent = self.indent.saturating_sub(1);
        self.line(terminator);
    }

    pub fn finish(self) -> String {
        debug_assert_eq!(self.indent, 0, "unclosed scope");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_scopes() {
        let mut w = SourceWriter::new();
        w.open("impl Demo");
        w.open("fn run(&self)");
        w.line("self.tick();");
        w.close();
        w.close();

        assert_eq!(
            w.finish(),
            "impl Demo {\n    fn run(&self) {\n        self.tick();\n    }\n}\n"
        );
    }

    #[test]
    fn test_call_scope_and_custom_terminator() {
        let mut w = SourceWriter::new();
        w.open_call("gate.register_func(");
        w.line("move |(a, b)| a + b");
        w.close_with("});");
        assert_eq!(
            w.finish(),
            "gate.register_func({\n    move |(a, b)| a + b\n});\n"
        );
    }
}
