/// Append-only text buffer for one output file, with indentation tracking.
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indent level
    indent_width: usize,
    /// Text emitted so far
    out: String,
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new(4)
    }
}

impl EmitContext {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_level: 0,
            indent_width,
            out: String::new(),
        }
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.indent_width)
    }

    /// Increase indentation by one level.
    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation by one level.
    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Current indent level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Write one indented line followed by a newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let ind = self.indent();
        self.out.push_str(&ind);
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Write an empty line. Never indented.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write text verbatim, ignoring indentation.
    pub fn raw(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
    }

    /// Consume the context and return the emitted text.
    pub fn finish(self) -> String {
        self.out
    }
}
