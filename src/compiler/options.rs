/// Settings for one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Wrap function literals so that calls with too few arguments return a
    /// partial application.
    pub curry: bool,
    /// Spaces per indentation level in the generated code.
    pub indent_width: usize,
    /// Names resolved from the `$globals` object passed to the program.
    pub globals: Vec<String>,
    /// Name recorded in diagnostic positions.
    pub file_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            curry: true,
            indent_width: 2,
            globals: vec![],
            file_name: String::from("<input>"),
        }
    }
}
