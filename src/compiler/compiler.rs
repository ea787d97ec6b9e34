//! Main code generator module.
//!
//! This module contains the `Compiler` state and the entry points that lower
//! a bound tree to JavaScript. Lowering never fails: anything that cannot be
//! compiled becomes an expression that throws when evaluated, so the output
//! is always a valid program.

use crate::{ast::ast::Expr, binder::binder::Bindings};

use super::{
    expr::gen_expression,
    options::CompileOptions,
    stdlib::{GLOBALS_NAME, RUNTIME, RUNTIME_NAME},
    writer::Writer,
};

/// Code generation state for one tree.
pub struct Compiler<'a> {
    /// Name resolution results for the tree being compiled
    pub bindings: &'a Bindings,
    pub options: &'a CompileOptions,
    /// Output buffer
    pub writer: Writer,
    /// Counter for renamed duplicate parameters
    unused_params: u32,
}

impl<'a> Compiler<'a> {
    pub fn new(bindings: &'a Bindings, options: &'a CompileOptions) -> Self {
        Compiler {
            bindings,
            options,
            writer: Writer::new(options.indent_width),
            unused_params: 0,
        }
    }

    /// A fresh parameter name for a duplicate that can never be referenced.
    pub fn next_unused_name(&mut self) -> String {
        let name = format!("$unused{}", self.unused_params);
        self.unused_params += 1;
        name
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }
}

/// Lowers `root` to a single JavaScript expression.
///
/// The expression expects `$rt` (the runtime) and `$globals` to be in scope;
/// `generate_program` provides both.
pub fn generate(root: &Expr, bindings: &Bindings, options: &CompileOptions) -> String {
    let mut compiler = Compiler::new(bindings, options);
    gen_expression(&mut compiler, root);
    compiler.finish()
}

/// Lowers `root` to a complete program: a function taking the globals
/// object and returning the value of the expression.
pub fn generate_program(root: &Expr, bindings: &Bindings, options: &CompileOptions) -> String {
    let mut compiler = Compiler::new(bindings, options);

    compiler
        .writer
        .line(&format!("(function ({}) {{", GLOBALS_NAME));
    compiler.writer.indent();
    compiler.writer.line("\"use strict\";");
    compiler
        .writer
        .lines(&format!("var {} = {};", RUNTIME_NAME, RUNTIME));
    compiler.writer.write("return ");
    gen_expression(&mut compiler, root);
    compiler.writer.line(";");
    compiler.writer.dedent();
    compiler.writer.line("})");

    compiler.finish()
}
