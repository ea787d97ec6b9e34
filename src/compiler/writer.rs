/// Text builder with explicit indentation.
///
/// Indentation is inserted lazily at the start of each line, so multi-line
/// fragments nested inside an expression pick up the enclosing level.
pub struct Writer {
    output: String,
    indent: usize,
    indent_width: usize,
    at_line_start: bool,
}

impl Writer {
    pub fn new(indent_width: usize) -> Self {
        Writer {
            output: String::new(),
            indent: 0,
            indent_width,
            at_line_start: true,
        }
    }

    /// Appends `text`, which must not contain newlines.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.output.push_str(&" ".repeat(self.indent * self.indent_width));
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    /// Writes each line of `text` at the current indentation, keeping the
    /// relative indentation inside it.
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.output
    }
}
