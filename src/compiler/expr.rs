use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ApplyExpr, BinaryExpr, FnExpr, FnParamExpr, IdentifierExpr, LetExpr, LiteralExpr,
            RecordExpr, SyntaxErrorExpr, UnaryExpr,
        },
    },
    binder::{
        binder::Resolution,
        scope::{BindingKind, ScopeId},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{
    compiler::Compiler,
    stdlib::{GLOBALS_NAME, RUNTIME_NAME},
};

lazy_static! {
    static ref PLAIN_IDENTIFIER: Regex = Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    /// Reserved words, plus the globals generated code refers to directly.
    static ref JS_RESERVED: HashSet<&'static str> = [
        "Error",
        "arguments", "await", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
        "false", "finally", "for", "function", "if", "implements", "import", "in",
        "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
        "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
        "typeof", "var", "void", "while", "with", "yield", "undefined", "NaN", "Infinity",
    ]
    .into_iter()
    .collect();
}

/// Maps a source name to a JavaScript identifier.
///
/// Names that are already plain, non-reserved JavaScript identifiers are
/// kept. Everything else goes into the `$_` namespace, with each character
/// outside `[A-Za-z0-9_]` written as `$<hex code point>$`. Plain names never
/// contain `$`, so escaped names cannot collide with them or with the
/// generator's own `$` names.
pub fn escape_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) && !JS_RESERVED.contains(name) {
        return name.to_string();
    }

    let mut escaped = String::from("$_");
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            escaped.push(c);
        } else {
            escaped.push_str(&format!("${:x}$", c as u32));
        }
    }
    escaped
}

/// A double-quoted JavaScript string literal.
pub fn js_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c if (c as u32) < 0x20 => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn property_access(object: &str, name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, js_string(name))
    }
}

/// Variable holding the record object of a `let` scope.
fn scope_record_name(scope: ScopeId) -> String {
    format!("$s{}", scope)
}

fn throw_statement(message: &str) -> String {
    format!("throw new Error({});", js_string(message))
}

/// An expression that throws `message` when evaluated.
fn gen_throw(compiler: &mut Compiler, message: &str) {
    compiler.writer.write(&format!(
        "(function () {{ {} }})()",
        throw_statement(message)
    ));
}

fn syntax_error_message(error: &SyntaxErrorExpr) -> String {
    format!("Syntax error: {}", error.error)
}

/// Stand-ins for items of a list that failed to parse, run when the
/// construct holding the list is entered.
fn gen_error_statements<'e>(compiler: &mut Compiler, items: impl Iterator<Item = &'e Expr>) {
    for item in items {
        if let Expr::SyntaxError(error) = item {
            compiler
                .writer
                .line(&throw_statement(&syntax_error_message(error)));
        }
    }
}

/// Generates JavaScript for the given expression.
pub fn gen_expression(compiler: &mut Compiler, expression: &Expr) {
    match expression {
        Expr::Identifier(identifier) => gen_identifier(compiler, identifier),
        Expr::Literal(literal) => gen_literal(compiler, literal),
        Expr::Paren(paren) => gen_expression(compiler, &paren.expr),
        Expr::Let(let_expr) => gen_let(compiler, let_expr),
        Expr::Fn(fn_expr) => gen_fn(compiler, fn_expr),
        Expr::Record(record) => gen_record(compiler, record),
        Expr::Binary(binary) => gen_binary(compiler, binary),
        Expr::Unary(unary) => gen_unary(compiler, unary),
        Expr::Apply(apply) => gen_apply(compiler, apply),
        Expr::NotImplemented(_) => gen_throw(compiler, &ErrorImpl::NotImplemented.to_string()),
        Expr::SyntaxError(error) => gen_throw(compiler, &syntax_error_message(error)),
        // Only reachable through their parent constructs.
        Expr::LetBinding(_) | Expr::FnParam(_) | Expr::RecordField(_) => {
            gen_throw(compiler, "Unsupported node")
        }
    }
}

fn gen_identifier(compiler: &mut Compiler, identifier: &IdentifierExpr) {
    let name = identifier.name();
    let bindings = compiler.bindings;
    let code = match bindings.get_resolution(identifier.id) {
        Some(Resolution::Bound(binding)) => match binding.kind {
            BindingKind::Param => escape_identifier(name),
            BindingKind::Let => property_access(&scope_record_name(binding.scope), name),
            BindingKind::Global => property_access(GLOBALS_NAME, name),
        },
        Some(Resolution::Unresolved(error)) => return gen_throw(compiler, &error.to_string()),
        None => {
            let message = ErrorImpl::UnresolvedIdentifier {
                identifier: name.to_string(),
            }
            .to_string();
            return gen_throw(compiler, &message);
        }
    };

    compiler.writer.write(&code);
}

fn gen_literal(compiler: &mut Compiler, literal: &LiteralExpr) {
    let text = if literal.value.is_infinite() {
        String::from("Infinity")
    } else {
        literal.value.to_string()
    };
    compiler.writer.write(&text);
}

/// Writes `$rt.record([...])` with one eval-once entry per definition.
fn gen_record_call(compiler: &mut Compiler, definitions: &[(&str, &Expr)]) {
    if definitions.is_empty() {
        compiler
            .writer
            .write(&format!("{}.record([])", RUNTIME_NAME));
        return;
    }

    compiler
        .writer
        .line(&format!("{}.record([", RUNTIME_NAME));
    compiler.writer.indent();
    for (i, (name, value)) in definitions.iter().enumerate() {
        compiler
            .writer
            .line(&format!("[{}, function () {{", js_string(name)));
        compiler.writer.indent();
        compiler.writer.write("return ");
        gen_expression(compiler, value);
        compiler.writer.line(";");
        compiler.writer.dedent();
        compiler.writer.write("}]");
        if i + 1 < definitions.len() {
            compiler.writer.write(",");
        }
        compiler.writer.newline();
    }
    compiler.writer.dedent();
    compiler.writer.write("])");
}

/// `let` becomes an immediately invoked function that builds the scope's
/// record and returns the body. Bound names are read off the record, so
/// each initializer runs lazily and at most once.
fn gen_let(compiler: &mut Compiler, let_expr: &LetExpr) {
    let record_name = match compiler.bindings.get_node_scope(let_expr.id) {
        Some(scope) => scope_record_name(scope.id),
        None => format!("$l{}", let_expr.id.0),
    };
    let definitions: Vec<(&str, &Expr)> = let_expr
        .bindings
        .iter()
        .filter_map(|binding| match binding {
            Expr::LetBinding(binding) => Some((binding.decl.value.as_str(), &*binding.value)),
            _ => None,
        })
        .collect();

    compiler.writer.line("(function () {");
    compiler.writer.indent();
    compiler.writer.write(&format!("var {} = ", record_name));
    gen_record_call(compiler, &definitions);
    compiler.writer.line(";");
    gen_error_statements(compiler, let_expr.bindings.iter());
    compiler.writer.write("return ");
    gen_expression(compiler, &let_expr.body);
    compiler.writer.line(";");
    compiler.writer.dedent();
    compiler.writer.write("})()");
}

/// Parameter names for a function. All but the last of a repeated name are
/// renamed, matching the binder's last-declaration-wins rule.
fn param_names(compiler: &mut Compiler, params: &[&FnParamExpr]) -> Vec<String> {
    let mut names = vec![];
    for (i, param) in params.iter().enumerate() {
        if params[i + 1..].iter().any(|later| later.name() == param.name()) {
            names.push(compiler.next_unused_name());
        } else {
            names.push(escape_identifier(param.name()));
        }
    }
    names
}

fn gen_fn(compiler: &mut Compiler, fn_expr: &FnExpr) {
    let params: Vec<&FnParamExpr> = fn_expr.declared_params().collect();
    let names = param_names(compiler, &params);
    let curry = compiler.options.curry;

    if curry {
        compiler
            .writer
            .write(&format!("{}.curry({}, ", RUNTIME_NAME, names.len()));
    }
    compiler
        .writer
        .line(&format!("function ({}) {{", names.join(", ")));
    compiler.writer.indent();
    gen_error_statements(compiler, fn_expr.params.iter());
    compiler.writer.write("return ");
    gen_expression(compiler, &fn_expr.body);
    compiler.writer.line(";");
    compiler.writer.dedent();
    compiler.writer.write("}");
    if curry {
        compiler.writer.write(")");
    }
}

fn gen_record(compiler: &mut Compiler, record: &RecordExpr) {
    let definitions: Vec<(&str, &Expr)> = record
        .fields
        .iter()
        .filter_map(|field| match field {
            Expr::RecordField(field) => Some((field.decl.value.as_str(), &*field.value)),
            _ => None,
        })
        .collect();

    if !record.fields.iter().any(Expr::is_syntax_error) {
        gen_record_call(compiler, &definitions);
        return;
    }

    compiler.writer.line("(function () {");
    compiler.writer.indent();
    gen_error_statements(compiler, record.fields.iter());
    compiler.writer.write("return ");
    gen_record_call(compiler, &definitions);
    compiler.writer.line(";");
    compiler.writer.dedent();
    compiler.writer.write("})()");
}

fn gen_binary(compiler: &mut Compiler, binary: &BinaryExpr) {
    let operator = match binary.operator.kind {
        TokenKind::Plus => "+",
        TokenKind::Dash => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        _ => {
            let message = ErrorImpl::UncompilableOperator {
                operator: binary.operator.value.clone(),
            }
            .to_string();
            return gen_throw(compiler, &message);
        }
    };

    compiler.writer.write("(");
    gen_expression(compiler, &binary.left);
    compiler.writer.write(&format!(" {} ", operator));
    gen_expression(compiler, &binary.right);
    compiler.writer.write(")");
}

fn gen_unary(compiler: &mut Compiler, unary: &UnaryExpr) {
    let operator = match unary.operator.kind {
        TokenKind::Plus => "+",
        TokenKind::Dash => "-",
        _ => {
            let message = ErrorImpl::UncompilableOperator {
                operator: unary.operator.value.clone(),
            }
            .to_string();
            return gen_throw(compiler, &message);
        }
    };

    compiler.writer.write(&format!("({}", operator));
    gen_expression(compiler, &unary.expr);
    compiler.writer.write(")");
}

/// Whether the lowered expression can be called without parentheses.
fn is_simple_callee(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) | Expr::Apply(_) => true,
        Expr::Paren(paren) => is_simple_callee(&paren.expr),
        _ => false,
    }
}

fn gen_apply(compiler: &mut Compiler, apply: &ApplyExpr) {
    if is_simple_callee(&apply.callee) {
        gen_expression(compiler, &apply.callee);
    } else {
        compiler.writer.write("(");
        gen_expression(compiler, &apply.callee);
        compiler.writer.write(")");
    }

    compiler.writer.write("(");
    gen_expression(compiler, &apply.argument);
    compiler.writer.write(")");
}
