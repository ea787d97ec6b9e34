use std::fmt::Display;

use crate::Span;

use super::expressions::{
    ApplyExpr, BinaryExpr, FnExpr, FnParamExpr, IdentifierExpr, LetBindingExpr, LetExpr,
    LiteralExpr, NotImplementedExpr, ParenExpr, RecordExpr, RecordFieldExpr, SyntaxErrorExpr,
    UnaryExpr,
};

/// Identity of a node within one parse. Allocated by the parser in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Expression Types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExprType {
    Identifier,
    Literal,
    Paren,
    Let,
    LetBinding,
    Fn,
    FnParam,
    Record,
    RecordField,
    NotImplemented,
    Binary,
    Unary,
    Apply,
    SyntaxError,
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Literal(LiteralExpr),
    Paren(ParenExpr),
    Let(LetExpr),
    LetBinding(LetBindingExpr),
    Fn(FnExpr),
    FnParam(FnParamExpr),
    Record(RecordExpr),
    RecordField(RecordFieldExpr),
    NotImplemented(NotImplementedExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Apply(ApplyExpr),
    SyntaxError(SyntaxErrorExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Identifier(_) => ExprType::Identifier,
            Expr::Literal(_) => ExprType::Literal,
            Expr::Paren(_) => ExprType::Paren,
            Expr::Let(_) => ExprType::Let,
            Expr::LetBinding(_) => ExprType::LetBinding,
            Expr::Fn(_) => ExprType::Fn,
            Expr::FnParam(_) => ExprType::FnParam,
            Expr::Record(_) => ExprType::Record,
            Expr::RecordField(_) => ExprType::RecordField,
            Expr::NotImplemented(_) => ExprType::NotImplemented,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Apply(_) => ExprType::Apply,
            Expr::SyntaxError(_) => ExprType::SyntaxError,
        }
    }

    pub fn get_id(&self) -> NodeId {
        match self {
            Expr::Identifier(e) => e.id,
            Expr::Literal(e) => e.id,
            Expr::Paren(e) => e.id,
            Expr::Let(e) => e.id,
            Expr::LetBinding(e) => e.id,
            Expr::Fn(e) => e.id,
            Expr::FnParam(e) => e.id,
            Expr::Record(e) => e.id,
            Expr::RecordField(e) => e.id,
            Expr::NotImplemented(e) => e.id,
            Expr::Binary(e) => e.id,
            Expr::Unary(e) => e.id,
            Expr::Apply(e) => e.id,
            Expr::SyntaxError(e) => e.id,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(e) => &e.span,
            Expr::Literal(e) => &e.span,
            Expr::Paren(e) => &e.span,
            Expr::Let(e) => &e.span,
            Expr::LetBinding(e) => &e.span,
            Expr::Fn(e) => &e.span,
            Expr::FnParam(e) => &e.span,
            Expr::Record(e) => &e.span,
            Expr::RecordField(e) => &e.span,
            Expr::NotImplemented(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Apply(e) => &e.span,
            Expr::SyntaxError(e) => &e.span,
        }
    }

    /// The sub-expressions a generic walk visits, in source order.
    ///
    /// `Let` yields its bindings followed by its body; `Fn` yields only its
    /// body, so parameters are not visited.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Paren(e) => vec![&*e.expr],
            Expr::Let(e) => e
                .bindings
                .iter()
                .chain(std::iter::once(&*e.body))
                .collect(),
            Expr::LetBinding(e) => vec![&*e.value],
            Expr::Fn(e) => vec![&*e.body],
            Expr::Record(e) => e.fields.iter().collect(),
            Expr::RecordField(e) => vec![&*e.value],
            Expr::Binary(e) => vec![&*e.left, &*e.right],
            Expr::Unary(e) => vec![&*e.expr],
            Expr::Apply(e) => vec![&*e.callee, &*e.argument],
            Expr::Identifier(_)
            | Expr::Literal(_)
            | Expr::FnParam(_)
            | Expr::NotImplemented(_)
            | Expr::SyntaxError(_) => vec![],
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Expr::SyntaxError(_))
    }

    /// Short description: node kind plus its parameters, operator, declared
    /// name or token text.
    pub fn node_name(&self) -> String {
        let mut name = self.get_expr_type().to_string();
        match self {
            Expr::Fn(e) => {
                for param in e.declared_params() {
                    name.push(' ');
                    name.push_str(param.name());
                }
            }
            Expr::Binary(e) => name += &format!(" {}", e.operator.value),
            Expr::Unary(e) => name += &format!(" {}", e.operator.value),
            Expr::LetBinding(e) => name += &format!(" {}=", e.decl.value),
            Expr::RecordField(e) => name += &format!(" {}=", e.decl.value),
            Expr::Identifier(e) => name += &format!(" ({})", e.token.value),
            Expr::Literal(e) => name += &format!(" ({})", e.token.value),
            Expr::FnParam(e) => name += &format!(" ({})", e.token.value),
            Expr::SyntaxError(e) => name += &format!(": {}", e.error),
            _ => {}
        }
        name
    }
}

/// Callbacks for `walk_tree`. `enter` runs before a node's children and
/// `leave` after them.
pub trait TreeWalker {
    fn enter(&mut self, _expr: &Expr) {}
    fn leave(&mut self, _expr: &Expr) {}
}

pub fn walk_tree<W: TreeWalker>(expr: &Expr, walker: &mut W) {
    walker.enter(expr);
    for child in expr.children() {
        walk_tree(child, walker);
    }
    walker.leave(expr);
}

struct TreeDumper {
    depth: usize,
    output: String,
}

impl TreeWalker for TreeDumper {
    fn enter(&mut self, expr: &Expr) {
        self.output.push_str(&"  ".repeat(self.depth));
        self.output.push_str(&expr.node_name());
        self.output.push('\n');
        self.depth += 1;
    }

    fn leave(&mut self, _expr: &Expr) {
        self.depth -= 1;
    }
}

/// Renders the tree one node per line, indented by depth.
pub fn dump_tree(expr: &Expr) -> String {
    let mut dumper = TreeDumper {
        depth: 0,
        output: String::new(),
    };
    walk_tree(expr, &mut dumper);
    dumper.output
}
