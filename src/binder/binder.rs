use std::collections::HashMap;

use crate::{
    ast::{
        ast::{walk_tree, Expr, NodeId, TreeWalker},
        expressions::{FnExpr, IdentifierExpr, LetExpr, SyntaxErrorExpr},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::scope::{Binding, BindingKind, GlobalScope, Scope, ScopeId};

/// The outcome of looking up one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Bound(Binding),
    Unresolved(Error),
}

/// Binder output: every scope created, plus side tables keyed by node.
#[derive(Debug)]
pub struct Bindings {
    scopes: Vec<Scope>,
    resolutions: HashMap<NodeId, Resolution>,
    node_scopes: HashMap<NodeId, ScopeId>,
}

impl Bindings {
    pub fn get_resolution(&self, identifier: NodeId) -> Option<&Resolution> {
        self.resolutions.get(&identifier)
    }

    pub fn get_binding(&self, identifier: NodeId) -> Option<&Binding> {
        match self.resolutions.get(&identifier) {
            Some(Resolution::Bound(binding)) => Some(binding),
            _ => None,
        }
    }

    pub fn get_bind_error(&self, identifier: NodeId) -> Option<&Error> {
        match self.resolutions.get(&identifier) {
            Some(Resolution::Unresolved(error)) => Some(error),
            _ => None,
        }
    }

    /// The scope introduced by a `Let` or `Fn` node.
    pub fn get_node_scope(&self, node: NodeId) -> Option<&Scope> {
        self.node_scopes.get(&node).map(|id| self.get_scope(*id))
    }

    pub fn get_scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn get_global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

struct Binder {
    scopes: Vec<Scope>,
    /// Scopes entered and not yet left, innermost last
    scope_path: Vec<ScopeId>,
    resolutions: HashMap<NodeId, Resolution>,
    node_scopes: HashMap<NodeId, ScopeId>,
}

impl Binder {
    fn new(globals: &GlobalScope) -> Self {
        Binder {
            scopes: vec![globals.to_scope()],
            scope_path: vec![ScopeId(0)],
            resolutions: HashMap::new(),
            node_scopes: HashMap::new(),
        }
    }

    fn get_current_scope(&self) -> ScopeId {
        self.scope_path[self.scope_path.len() - 1]
    }

    /// Creates a scope for `node`, child of the current one, and enters it.
    fn add_scope(&mut self, node: NodeId) -> &mut Scope {
        let id = ScopeId(self.scopes.len() as u32);
        let parent = self.get_current_scope();
        self.scopes.push(Scope::new(id, Some(parent), Some(node)));
        self.node_scopes.insert(node, id);
        self.scope_path.push(id);

        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Looks `name` up through the scope chain, innermost first.
    fn lookup(&self, name: &str) -> Option<&Binding> {
        let mut scope = Some(self.get_current_scope());
        while let Some(id) = scope {
            let current = &self.scopes[id.0 as usize];
            if let Some(binding) = current.get_binding(name) {
                return Some(binding);
            }
            scope = current.parent;
        }
        None
    }

    fn bind_identifier(&mut self, identifier: &IdentifierExpr) {
        let resolution = match self.lookup(identifier.name()) {
            Some(binding) => Resolution::Bound(binding.clone()),
            None => Resolution::Unresolved(Error::new(
                ErrorImpl::UnresolvedIdentifier {
                    identifier: identifier.name().to_string(),
                },
                identifier.span.start.clone(),
            )),
        };
        self.resolutions.insert(identifier.id, resolution);
    }

    fn bind_fn(&mut self, fn_expr: &FnExpr) {
        let scope = self.add_scope(fn_expr.id);
        for param in fn_expr.declared_params() {
            scope.declare(param.name(), BindingKind::Param, Some(param.id));
        }
    }

    fn bind_let(&mut self, let_expr: &LetExpr) {
        let scope = self.add_scope(let_expr.id);
        for binding in &let_expr.bindings {
            if let Expr::LetBinding(binding) = binding {
                scope.declare(&binding.decl.value, BindingKind::Let, Some(binding.id));
            }
        }
    }
}

impl TreeWalker for Binder {
    fn enter(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(identifier) => self.bind_identifier(identifier),
            Expr::Fn(fn_expr) => self.bind_fn(fn_expr),
            Expr::Let(let_expr) => self.bind_let(let_expr),
            _ => {}
        }
    }

    fn leave(&mut self, expr: &Expr) {
        let current = self.get_current_scope();
        if self.scopes[current.0 as usize].node == Some(expr.get_id()) {
            self.scope_path.pop();
        }
    }
}

/// Resolves every identifier in `root` to its declaration.
///
/// `let` and `fn` each open a scope; a name resolves to the innermost
/// declaration visible from the reference, falling back to `globals`.
/// Names that resolve nowhere get an `UnresolvedIdentifier` error instead.
pub fn bind(root: &Expr, globals: &GlobalScope) -> Bindings {
    let mut binder = Binder::new(globals);
    walk_tree(root, &mut binder);

    Bindings {
        scopes: binder.scopes,
        resolutions: binder.resolutions,
        node_scopes: binder.node_scopes,
    }
}

struct DiagnosticCollector<'a> {
    bindings: &'a Bindings,
    diagnostics: Vec<Error>,
}

impl DiagnosticCollector<'_> {
    fn add_syntax_error(&mut self, error: &SyntaxErrorExpr) {
        self.diagnostics.push(error.error.clone());
        for token in &error.tokens {
            if let Some(token_error) = &token.error {
                if *token != error.error_token {
                    self.diagnostics.push(token_error.clone());
                }
            }
        }
    }
}

impl TreeWalker for DiagnosticCollector<'_> {
    fn enter(&mut self, expr: &Expr) {
        match expr {
            Expr::SyntaxError(error) => self.add_syntax_error(error),
            Expr::Identifier(identifier) => {
                if let Some(error) = self.bindings.get_bind_error(identifier.id) {
                    self.diagnostics.push(error.clone());
                }
            }
            // Parameters are not children, so their errors are picked up here.
            Expr::Fn(fn_expr) => {
                for param in &fn_expr.params {
                    if let Expr::SyntaxError(error) = param {
                        self.add_syntax_error(error);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Every lexer, syntax and bind error in the tree, in tree order.
pub fn collect_diagnostics(root: &Expr, bindings: &Bindings) -> Vec<Error> {
    let mut collector = DiagnosticCollector {
        bindings,
        diagnostics: vec![],
    };
    walk_tree(root, &mut collector);
    collector.diagnostics
}
