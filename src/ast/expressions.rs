use crate::{errors::errors::Error, lexer::tokens::Token, Span};

use super::ast::{Expr, NodeId};

// LEAVES

/// Identifier Expression
/// A reference to a name declared by `let`, a function parameter or the global scope.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub id: NodeId,
    pub token: Token,
    pub span: Span,
}

impl IdentifierExpr {
    pub fn name(&self) -> &str {
        &self.token.value
    }
}

/// Literal Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub id: NodeId,
    pub value: f64,
    pub token: Token,
    pub span: Span,
}

/// Not Implemented Expression
/// The `...` placeholder. Compiles to code that fails when evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct NotImplementedExpr {
    pub id: NodeId,
    pub token: Token,
    pub span: Span,
}

/// Syntax Error Expression
/// Stands in for source that could not be parsed. `tokens` holds exactly the
/// tokens skipped while resynchronizing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxErrorExpr {
    pub id: NodeId,
    pub error: Error,
    pub error_token: Token,
    pub tokens: Vec<Token>,
    pub span: Span,
}

// SCOPES

/// Let Expression
/// `let a = 1; b = 2 in body`
///
/// `bindings` holds `LetBinding` nodes, or `SyntaxError` nodes for bindings
/// that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct LetExpr {
    pub id: NodeId,
    pub let_token: Token,
    pub bindings: Vec<Expr>,
    pub in_token: Token,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetBindingExpr {
    pub id: NodeId,
    pub decl: Token,
    pub equals: Token,
    pub value: Box<Expr>,
    pub span: Span,
}

/// Fn Expression
/// `fn a b => body`
///
/// `params` holds `FnParam` nodes, or `SyntaxError` nodes for parameters
/// that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct FnExpr {
    pub id: NodeId,
    pub fn_token: Token,
    pub params: Vec<Expr>,
    pub arrow: Token,
    pub body: Box<Expr>,
    pub span: Span,
}

impl FnExpr {
    /// Parameters that parsed, in declaration order.
    pub fn declared_params(&self) -> impl Iterator<Item = &FnParamExpr> {
        self.params.iter().filter_map(|param| match param {
            Expr::FnParam(param) => Some(param),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnParamExpr {
    pub id: NodeId,
    pub token: Token,
    pub span: Span,
}

impl FnParamExpr {
    pub fn name(&self) -> &str {
        &self.token.value
    }
}

// RECORDS

/// Record Expression
/// `{ a = 1; b = 2; }`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordExpr {
    pub id: NodeId,
    pub open: Token,
    pub fields: Vec<Expr>,
    pub close: Token,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFieldExpr {
    pub id: NodeId,
    pub decl: Token,
    pub equals: Token,
    pub value: Box<Expr>,
    pub span: Span,
}

// COMPLEX

/// Parenthesized Expression
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub id: NodeId,
    pub expr: Box<Expr>,
    pub span: Span,
}

/// Binary Expression
/// Arithmetic (`+ - * /`) and the `^^` meta operator.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub id: NodeId,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Unary Expression
/// Prefix `+` or `-`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub id: NodeId,
    pub operator: Token,
    pub expr: Box<Expr>,
    pub span: Span,
}

/// Apply Expression
/// Function application by juxtaposition: `f x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyExpr {
    pub id: NodeId,
    pub callee: Box<Expr>,
    pub argument: Box<Expr>,
    pub span: Span,
}
