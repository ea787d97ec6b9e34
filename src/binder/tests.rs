//! Unit tests for the binder module.

use super::{
    binder::{bind, collect_diagnostics, Bindings},
    scope::{BindingKind, GlobalScope, ScopeId},
};
use crate::{
    ast::ast::{walk_tree, Expr, NodeId, TreeWalker},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn bind_source(source: &str, globals: &[&str]) -> (Expr, Bindings) {
    let tree = parse(tokenize(source, Some("test.nib".to_string())));
    let bindings = bind(&tree, &GlobalScope::new(globals.iter().copied()));
    (tree, bindings)
}

/// Collects `(name, id)` for every identifier reference and every
/// `Let`/`Fn` node id, in tree order.
#[derive(Default)]
struct Collector {
    identifiers: Vec<(String, NodeId)>,
    scope_nodes: Vec<NodeId>,
    let_bindings: Vec<NodeId>,
    params: Vec<NodeId>,
}

impl TreeWalker for Collector {
    fn enter(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(identifier) => self
                .identifiers
                .push((identifier.name().to_string(), identifier.id)),
            Expr::Let(let_expr) => self.scope_nodes.push(let_expr.id),
            Expr::Fn(fn_expr) => {
                self.scope_nodes.push(fn_expr.id);
                self.params.extend(fn_expr.declared_params().map(|p| p.id));
            }
            Expr::LetBinding(binding) => self.let_bindings.push(binding.id),
            _ => {}
        }
    }
}

fn collect(tree: &Expr) -> Collector {
    let mut collector = Collector::default();
    walk_tree(tree, &mut collector);
    collector
}

#[test]
fn test_shadowing() {
    let (tree, bindings) = bind_source("let x = 1 in let x = 2 in x", &[]);
    let nodes = collect(&tree);

    assert_eq!(nodes.identifiers.len(), 1);
    let (_, x) = nodes.identifiers[0];
    let binding = bindings.get_binding(x).expect("x should be bound");

    assert_eq!(binding.kind, BindingKind::Let);
    assert_eq!(binding.declaring_node, Some(nodes.let_bindings[1]));
    assert_eq!(
        bindings.get_node_scope(nodes.scope_nodes[1]).map(|s| s.id),
        Some(binding.scope)
    );
}

#[test]
fn test_unresolved_identifier() {
    let (tree, bindings) = bind_source("let x = 1 in y", &[]);
    let nodes = collect(&tree);
    let (_, y) = nodes.identifiers[0];

    assert!(bindings.get_binding(y).is_none());
    let error = bindings.get_bind_error(y).expect("y should not resolve");
    assert_eq!(error.to_string(), "Cannot find the definition of [y].");
    assert_eq!(error.get_position().0, 13);
}

#[test]
fn test_every_identifier_gets_exactly_one_resolution() {
    let (tree, bindings) = bind_source("let f = fn a => a + b in f c", &[]);
    let nodes = collect(&tree);

    for (name, id) in &nodes.identifiers {
        let bound = bindings.get_binding(*id).is_some();
        let failed = bindings.get_bind_error(*id).is_some();
        assert!(bound != failed, "{} should be bound xor failed", name);
    }
}

#[test]
fn test_params_bind_as_params() {
    let (tree, bindings) = bind_source("fn a => a", &[]);
    let nodes = collect(&tree);
    let binding = bindings.get_binding(nodes.identifiers[0].1).unwrap();

    assert_eq!(binding.kind, BindingKind::Param);
    assert_eq!(binding.declaring_node, Some(nodes.params[0]));
    assert_eq!(
        bindings.get_node_scope(nodes.scope_nodes[0]).unwrap().id,
        binding.scope
    );
}

#[test]
fn test_duplicate_params_last_wins() {
    let (tree, bindings) = bind_source("fn a a => a", &[]);
    let nodes = collect(&tree);
    let binding = bindings.get_binding(nodes.identifiers[0].1).unwrap();

    assert_eq!(nodes.params.len(), 2);
    assert_eq!(binding.declaring_node, Some(nodes.params[1]));
}

#[test]
fn test_let_bindings_see_each_other() {
    let (tree, bindings) = bind_source("let a = b; b = 1 in a", &[]);
    let nodes = collect(&tree);

    let (name, b) = &nodes.identifiers[0];
    assert_eq!(name, "b");
    let binding = bindings.get_binding(*b).unwrap();
    assert_eq!(binding.declaring_node, Some(nodes.let_bindings[1]));
}

#[test]
fn test_globals() {
    let (tree, bindings) = bind_source("print 1", &["print"]);
    let nodes = collect(&tree);
    let binding = bindings.get_binding(nodes.identifiers[0].1).unwrap();

    assert_eq!(binding.kind, BindingKind::Global);
    assert_eq!(binding.scope, ScopeId(0));
    assert_eq!(binding.declaring_node, None);
    assert_eq!(bindings.get_global_scope().id, ScopeId(0));
}

#[test]
fn test_local_shadows_global() {
    let (tree, bindings) = bind_source("fn print => print", &["print"]);
    let nodes = collect(&tree);
    let binding = bindings.get_binding(nodes.identifiers[0].1).unwrap();

    assert_eq!(binding.kind, BindingKind::Param);
}

#[test]
fn test_scope_ends_with_its_node() {
    let (tree, bindings) = bind_source("let f = fn x => x in x", &[]);
    let nodes = collect(&tree);

    assert_eq!(nodes.identifiers.len(), 2);
    assert!(bindings.get_binding(nodes.identifiers[0].1).is_some());
    assert!(bindings.get_bind_error(nodes.identifiers[1].1).is_some());
}

#[test]
fn test_scope_chain_follows_nesting() {
    let (tree, bindings) = bind_source("let a = 1 in fn b => a + b", &[]);
    let nodes = collect(&tree);

    let let_scope = bindings.get_node_scope(nodes.scope_nodes[0]).unwrap();
    let fn_scope = bindings.get_node_scope(nodes.scope_nodes[1]).unwrap();

    assert_eq!(let_scope.id, ScopeId(1));
    assert_eq!(let_scope.parent, Some(ScopeId(0)));
    assert_eq!(fn_scope.id, ScopeId(2));
    assert_eq!(fn_scope.parent, Some(let_scope.id));
    assert_eq!(bindings.scopes().len(), 3);

    let a = bindings.get_binding(nodes.identifiers[0].1).unwrap();
    assert_eq!(a.scope, let_scope.id);
}

#[test]
fn test_sibling_scopes_share_a_parent() {
    let (tree, bindings) = bind_source("(fn a => a) (fn b => b)", &[]);
    let nodes = collect(&tree);

    let first = bindings.get_node_scope(nodes.scope_nodes[0]).unwrap();
    let second = bindings.get_node_scope(nodes.scope_nodes[1]).unwrap();
    assert_eq!(first.parent, Some(ScopeId(0)));
    assert_eq!(second.parent, Some(ScopeId(0)));
    assert_ne!(first.id, second.id);
}

#[test]
fn test_collect_diagnostics_in_tree_order() {
    let (tree, bindings) = bind_source("let x = in y", &[]);
    let diagnostics = collect_diagnostics(&tree, &bindings);

    let messages: Vec<String> = diagnostics.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Cannot parse 'in' as an expression".to_string(),
            "Cannot find the definition of [y].".to_string(),
        ]
    );
}

#[test]
fn test_collect_diagnostics_includes_params_and_lexer_errors() {
    let (tree, bindings) = bind_source("fn 1 => [oops", &[]);
    let diagnostics = collect_diagnostics(&tree, &bindings);

    let names: Vec<&str> = diagnostics.iter().map(|e| e.get_error_name()).collect();
    assert_eq!(
        names,
        vec!["UnexpectedToken", "UnterminatedQuotedIdentifier"]
    );
}

#[test]
fn test_clean_program_has_no_diagnostics() {
    let (tree, bindings) = bind_source("let id = fn x => x in id 1", &[]);

    assert!(collect_diagnostics(&tree, &bindings).is_empty());
}
