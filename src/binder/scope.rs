use std::{collections::HashMap, fmt::Display};

use crate::ast::ast::NodeId;

/// Identity of a scope within one binder run. Allocated in creation order;
/// the global scope is always `ScopeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Declared by a `let` binding; lives on the scope's record object.
    Let,
    /// A function parameter; a plain target-language variable.
    Param,
    /// Supplied from outside the program.
    Global,
}

/// What a name resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    pub scope: ScopeId,
    /// The `LetBinding` or `FnParam` node; `None` for globals.
    pub declaring_node: Option<NodeId>,
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    /// The `Let` or `Fn` node that introduced this scope.
    pub node: Option<NodeId>,
    pub binding_lookup: HashMap<String, Binding>,
}

impl Scope {
    pub fn new(id: ScopeId, parent: Option<ScopeId>, node: Option<NodeId>) -> Self {
        Scope {
            id,
            parent,
            node,
            binding_lookup: HashMap::new(),
        }
    }

    /// Declares `name` in this scope. A later declaration of the same name
    /// replaces the earlier one.
    pub fn declare(&mut self, name: &str, kind: BindingKind, declaring_node: Option<NodeId>) {
        self.binding_lookup.insert(
            name.to_string(),
            Binding {
                name: name.to_string(),
                kind,
                scope: self.id,
                declaring_node,
            },
        );
    }

    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.binding_lookup.get(name)
    }
}

/// Names available to a program before any of its own declarations.
#[derive(Debug, Clone, Default)]
pub struct GlobalScope {
    names: Vec<String>,
}

impl GlobalScope {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GlobalScope {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Builds the root of a scope chain.
    pub fn to_scope(&self) -> Scope {
        let mut scope = Scope::new(ScopeId(0), None, None);
        for name in &self.names {
            scope.declare(name, BindingKind::Global, None);
        }
        scope
    }
}
