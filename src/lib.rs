#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Expr,
    binder::{
        binder::{bind, collect_diagnostics, Bindings},
        scope::GlobalScope,
    },
    compiler::{compiler::generate_program, options::CompileOptions},
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
};

pub mod ast;
pub mod binder;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span from the start of `self` to the end of `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything produced by one run of the pipeline.
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub root: Expr,
    pub bindings: Bindings,
    /// Lexer, syntax and bind errors, in tree order
    pub diagnostics: Vec<Error>,
    /// The generated program
    pub output: String,
}

/// Lexes, parses, binds and generates `source`.
///
/// Always produces a program: diagnostics are reported alongside it, and the
/// code they concern throws when it runs.
pub fn compile(source: &str, options: &CompileOptions) -> Compilation {
    let tokens = tokenize(source, Some(options.file_name.clone()));
    let root = parse(tokens.clone());
    let bindings = bind(&root, &GlobalScope::new(options.globals.iter().cloned()));
    let diagnostics = collect_diagnostics(&root, &bindings);
    let output = generate_program(&root, &bindings, options);

    Compilation {
        tokens,
        root,
        bindings,
        diagnostics,
        output,
    }
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text (with its newline) and the
/// offset within the line. An offset at the very end of the source belongs
/// to the last line. Returns `None` past the end.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();
        let at_end_of_last_line = pos == end && end == source.len() && !line.ends_with('\n');

        if (start..end).contains(&pos) || at_end_of_last_line {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Empty source, or the end of a source ending in a newline.
    Some((line_number, String::new(), 0))
}

/// Renders a diagnostic against its source.
///
/// ```text
/// Error: UnrecognisedSymbol (quote unusual identifiers with '[' and ']')
/// -> main.nib
///   |
/// 1 | let a = # in a
///   | --------^
///   = Unrecognized symbol. (Did you mean to quote this as an identifier, with '[]'?)
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        output.push_str(&format!("  = {}\n", error));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!(
        "{} | {}\n",
        line_string,
        line_text_removed.trim_end()
    ));

    let column = line_text
        .get(..line_pos)
        .map_or(line_pos, |before| before.chars().count());
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    output.push_str(&format!("{:>padding$} {}\n", "=", error));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
