use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Context as _;
use clap::Parser as _;
use nib::{
    ast::ast::dump_tree,
    binder::{
        binder::{bind, collect_diagnostics},
        scope::GlobalScope,
    },
    compiler::{compiler::generate_program, options::CompileOptions},
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
};

/// Compile a nib program to JavaScript.
#[derive(clap::Parser)]
#[command(version)]
struct Args {
    /// Source file to compile
    input: PathBuf,
    /// Write the program here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Do not wrap functions for automatic currying
    #[arg(long)]
    no_curry: bool,
    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,
    /// Name supplied by the host through the `$globals` object
    #[arg(long = "global", value_name = "NAME")]
    globals: Vec<String>,
    /// Print the token stream to stderr
    #[arg(long)]
    tokens: bool,
    /// Print the syntax tree to stderr
    #[arg(long)]
    tree: bool,
    /// Print per-phase timings to stderr
    #[arg(long)]
    timings: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read `{}`", args.input.display()))?;
    let file_name = args.input.display().to_string();

    let options = CompileOptions {
        curry: !args.no_curry,
        indent_width: args.indent,
        globals: args.globals.clone(),
        file_name: file_name.clone(),
    };

    let start = Instant::now();
    let tokens = tokenize(&source, Some(options.file_name.clone()));
    if args.timings {
        eprintln!("Tokenized in {:?}", start.elapsed());
    }
    if args.tokens {
        for token in &tokens {
            eprintln!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let root = parse(tokens);
    if args.timings {
        eprintln!("Parsed in {:?}", parse_start.elapsed());
    }
    if args.tree {
        eprint!("{}", dump_tree(&root));
    }

    let bind_start = Instant::now();
    let bindings = bind(&root, &GlobalScope::new(options.globals.iter().cloned()));
    if args.timings {
        eprintln!("Bound in {:?}", bind_start.elapsed());
    }

    let generate_start = Instant::now();
    let program = generate_program(&root, &bindings, &options);
    if args.timings {
        eprintln!("Generated in {:?}", generate_start.elapsed());
        eprintln!("Total time: {:?}", start.elapsed());
    }

    let diagnostics = collect_diagnostics(&root, &bindings);
    for error in &diagnostics {
        eprintln!("{}", render_error(error, &source, &file_name));
    }

    match &args.output {
        Some(path) => fs::write(path, &program)
            .with_context(|| format!("failed to write `{}`", path.display()))?,
        None => print!("{}", program),
    }

    if diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
