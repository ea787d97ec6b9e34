//! Integration tests for end-to-end compilation.
//!
//! These tests drive the complete pipeline from source code through
//! tokenization, parsing, binding and JavaScript generation. Tests that
//! check runtime behavior run the generated program under `node` and are
//! skipped when it is not installed.

use std::process::Command;

use nib::{
    ast::ast::Expr,
    compile,
    compiler::options::CompileOptions,
    lexer::tokens::TokenKind,
    render_error,
};

fn options(globals: &[&str]) -> CompileOptions {
    CompileOptions {
        globals: globals.iter().map(|g| g.to_string()).collect(),
        file_name: String::from("test.nib"),
        ..Default::default()
    }
}

/// Evaluates `program` under node, with `host` run afterwards in the same
/// script. Returns `None` when node is unavailable.
fn run_in_node(program: &str, host: &str) -> Option<String> {
    let script = format!("var program = {};\n{}\n", program.trim_end(), host);
    let output = Command::new("node").arg("-e").arg(&script).output().ok()?;

    assert!(
        output.status.success(),
        "node failed:\n{}\n{}",
        String::from_utf8_lossy(&output.stderr),
        script
    );
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn run(source: &str, globals: &[&str], host: &str) -> Option<String> {
    let compilation = compile(source, &options(globals));
    run_in_node(&compilation.output, host)
}

const PRINT_RESULT: &str = "console.log(program({}));";

const PRINT_ERROR: &str = "try { program({}); console.log(\"no error\"); } \
                           catch (e) { console.log(e.message); }";

#[test]
fn test_compile_simple_program() {
    let compilation = compile("let x = 42 in x", &options(&[]));

    assert!(compilation.diagnostics.is_empty());
    assert!(matches!(compilation.root, Expr::Let(_)));
    assert_eq!(
        compilation.tokens.last().map(|t| t.kind),
        Some(TokenKind::EOF)
    );
    assert!(compilation.output.starts_with("(function ($globals) {\n"));
    assert!(compilation.output.contains("return $s1.x;"));
}

#[test]
fn test_broken_programs_still_compile() {
    let sources = [
        "",
        "let",
        "let x = in x",
        "fn => ",
        "fn a b",
        "((((",
        "))))",
        "{ a = ; b }",
        "[unterminated",
        "[]",
        "1 . 2",
        "let a = 1; b = ) ; c = 3 in c",
        "f ^ g",
        "a ^^",
        "let x = 1 in let y = in",
    ];

    for source in sources {
        let compilation = compile(source, &options(&[]));
        assert!(
            !compilation.diagnostics.is_empty(),
            "`{}` should report a diagnostic",
            source
        );
        assert!(compilation.output.ends_with("})\n"));

        for error in &compilation.diagnostics {
            let rendered = render_error(error, source, "test.nib");
            assert!(rendered.starts_with("Error: "));
        }
    }
}

#[test]
fn test_deeply_nested_programs_still_compile() {
    let sources = [
        format!("{}1{}", "(".repeat(5000), ")".repeat(5000)),
        format!("{}1", "-".repeat(5000)),
        format!("{}1", "1 * ".repeat(5000)),
        format!("f{}", " x".repeat(5000)),
        format!("{}1", "fn a => ".repeat(5000)),
    ];

    for source in &sources {
        let compilation = compile(source, &options(&["f", "x"]));
        assert!(!compilation.diagnostics.is_empty());
        assert!(compilation.output.ends_with("})\n"));
    }
}

#[test]
fn test_diagnostics_are_in_tree_order() {
    let compilation = compile("let a = missing; b = # in a + other", &options(&[]));

    let names: Vec<&str> = compilation
        .diagnostics
        .iter()
        .map(|e| e.get_error_name())
        .collect();
    assert_eq!(
        names,
        vec![
            "UnresolvedIdentifier",
            "UnrecognisedSymbol",
            "UnresolvedIdentifier"
        ]
    );
}

#[test]
fn test_globals_resolve() {
    let compilation = compile("print 1", &options(&["print"]));

    assert!(compilation.diagnostics.is_empty());
    assert!(compilation.output.contains("return $globals.print(1);"));
}

#[test]
fn test_let_initializer_runs_once() {
    let host = "var count = 0;\n\
                var result = program({ tick: function (v) { count++; return v; } });\n\
                console.log(result, count);";

    let Some(output) = run("let x = tick 1 in x + x", &["tick"], host) else {
        return;
    };
    assert_eq!(output, "2 1");
}

#[test]
fn test_let_initializer_is_lazy() {
    let host = "var count = 0;\n\
                var result = program({ tick: function (v) { count++; return v; } });\n\
                console.log(result, count);";

    let Some(output) = run("let x = tick 1; y = 5 in y", &["tick"], host) else {
        return;
    };
    assert_eq!(output, "5 0");
}

#[test]
fn test_arithmetic_at_runtime() {
    let Some(output) = run("1 + 2 * 3 - 8 / 4", &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "5");

    let Some(output) = run("- 2 * 3 + 1", &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "-5");
}

#[test]
fn test_curried_application() {
    let source = "let add = fn a b => a + b; inc = add 1 in inc 41";

    let Some(output) = run(source, &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "42");
}

#[test]
fn test_partial_application_value() {
    let host = "var partial = program({});\n\
                console.log(partial.arity, JSON.stringify(partial.captured));";

    let Some(output) = run("(fn a b c => a) 1 2", &[], host) else {
        return;
    };
    assert_eq!(output, "1 [1,2]");
}

#[test]
fn test_duplicate_params_at_runtime() {
    let Some(output) = run("(fn a a => a) 1 2", &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "2");
}

#[test]
fn test_escaped_names_at_runtime() {
    let source = "(let [my value] = 2 in fn [class] => [class] * [my value]) 21";

    let Some(output) = run(source, &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "42");
}

#[test]
fn test_records_at_runtime() {
    let host = "var record = program({});\nconsole.log(record.a, record.b);";

    let Some(output) = run("{ a = 1 + 2; b = 3; }", &[], host) else {
        return;
    };
    assert_eq!(output, "3 3");
}

#[test]
fn test_runtime_errors() {
    let Some(output) = run("...", &[], PRINT_ERROR) else {
        return;
    };
    assert_eq!(output, "Not Implemented");

    let Some(output) = run("let a = b; b = a in a", &[], PRINT_ERROR) else {
        return;
    };
    assert_eq!(output, "Cyclic definition of [a].");

    let Some(output) = run("let x = 1 in y", &[], PRINT_ERROR) else {
        return;
    };
    assert_eq!(output, "Cannot find the definition of [y].");

    let Some(output) = run("(fn Error => ...) 1", &[], PRINT_ERROR) else {
        return;
    };
    assert_eq!(output, "Not Implemented");

    let Some(output) = run("let x = in 1", &[], PRINT_ERROR) else {
        return;
    };
    assert_eq!(
        output,
        "Syntax error: Cannot parse 'in' as an expression"
    );
}

#[test]
fn test_unused_error_does_not_throw() {
    let Some(output) = run("let x = 1; y = ... in x", &[], PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "1");
}

#[test]
fn test_uncurried_output_runs() {
    let compilation = compile(
        "(fn a b => a - b) 5",
        &CompileOptions {
            curry: false,
            ..options(&[])
        },
    );

    let Some(output) = run_in_node(&compilation.output, PRINT_RESULT) else {
        return;
    };
    assert_eq!(output, "NaN");
}
