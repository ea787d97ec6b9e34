//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, the token stream operations
//! and the top-level `parse` entry point. The parser is a Pratt parser:
//! a NUD (null denotation) table maps tokens that start an expression to
//! their handler, and a LED (left denotation) table maps tokens that
//! continue one to a handler plus a binding power.
//!
//! Error recovery works through a stack of resynchronization tokens. A
//! bounded construct (binding list, parameter list, record, parenthesis)
//! parses each item through `Parser::parse_with_resync`, naming the token
//! that terminates it. When a syntax error is raised, the stream skips ahead
//! to the nearest token that some pending construct is waiting for, and the
//! construct that was waiting for it receives a `SyntaxError` node covering
//! the skipped tokens. If no construct was waiting for it, the error reaches
//! `parse` and becomes the whole result.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, NodeId},
        expressions::SyntaxErrorExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup,
    },
};

/// Unwinds parsing to the nearest construct waiting for the current token.
///
/// Carries the syntax error node built when the error was raised.
#[derive(Debug)]
pub struct Resync(pub Box<SyntaxErrorExpr>);

pub type ParseResult = Result<Expr, Resync>;

/// Deepest expression nesting the parser accepts.
pub const MAX_NESTING: usize = 128;

/// Tallest tree an infix chain may build. Together with `MAX_NESTING` this
/// bounds the recursion of every later pass over the tree.
pub const MAX_TREE_DEPTH: usize = 1024;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, whitespace included
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Pending resynchronization tokens, innermost last, with the stream
    /// position at the time each was pushed
    resync_stack: Vec<(TokenKind, usize)>,
    /// Counter for generating node ids
    current_id: u32,
    /// Number of `parse_expr` calls currently active
    nesting: usize,
    /// Memoized tree heights of nodes built by infix handlers
    node_depths: HashMap<NodeId, usize>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// The token list must end with a `TokenKind::EOF` token, as produced by
    /// `tokenize`.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = match tokens.last() {
                Some(token) => token.span.end.clone(),
                None => Position::null(),
            };
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            resync_stack: vec![(TokenKind::EOF, 0)],
            current_id: 0,
            nesting: 0,
            node_depths: HashMap::new(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos + 1 < self.tokens.len() && self.tokens[self.pos].kind == TokenKind::Whitespace
        {
            self.pos += 1;
        }
    }

    /// Returns the current significant token without advancing.
    pub fn current_token(&mut self) -> &Token {
        self.skip_whitespace();
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current significant token.
    pub fn current_token_kind(&mut self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances past the current significant token and returns it.
    /// The stream never advances past EOF.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of the specified kind, or raises a syntax error
    /// without consuming anything.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Resync> {
        let token = self.current_token().clone();
        if token.kind != expected_kind {
            let error = ErrorImpl::UnexpectedToken {
                expected: expected_kind.to_string(),
                received: token.value.clone(),
            };
            Err(self.syntax_error(error, token))
        } else {
            Ok(self.advance())
        }
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Binding power of the current token when read as an infix operator.
    pub fn next_binding_power(&mut self) -> BindingPower {
        let kind = self.current_token_kind();
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    fn nesting_error(&mut self, limit: usize) -> Resync {
        let token = self.current_token().clone();
        self.syntax_error(ErrorImpl::NestingTooDeep { limit }, token)
    }

    /// Enters one more level of expression nesting, or raises a syntax
    /// error at the current token if that would exceed `MAX_NESTING`.
    pub fn enter_nesting(&mut self) -> Result<(), Resync> {
        if self.nesting >= MAX_NESTING {
            return Err(self.nesting_error(MAX_NESTING));
        }
        self.nesting += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    fn tree_depth(&mut self, expr: &Expr) -> usize {
        if let Some(depth) = self.node_depths.get(&expr.get_id()) {
            return *depth;
        }

        let depth = 1 + expr
            .children()
            .into_iter()
            .map(|child| self.tree_depth(child))
            .max()
            .unwrap_or(0);
        self.node_depths.insert(expr.get_id(), depth);
        depth
    }

    /// Checks the height of a node built by an infix handler. Left-leaning
    /// chains such as `a + b + c` grow the tree without nesting calls.
    pub fn check_depth(&mut self, expr: &Expr) -> Result<(), Resync> {
        if self.tree_depth(expr) > MAX_TREE_DEPTH {
            return Err(self.nesting_error(MAX_TREE_DEPTH));
        }
        Ok(())
    }

    fn push_resync(&mut self, kind: TokenKind) {
        self.resync_stack.push((kind, self.pos));
    }

    fn pop_resync(&mut self) {
        self.resync_stack.pop();
    }

    /// Runs `parse_fn` with `kind` as the innermost resynchronization token.
    ///
    /// Returns the parsed node, or a `SyntaxError` node if an error was
    /// raised and the stream resynchronized on `kind`. Either way the current
    /// token is then expected to be `kind` (unless parsing succeeded before
    /// reaching it). Errors that resynchronized on an outer token propagate.
    pub fn parse_with_resync<F>(&mut self, kind: TokenKind, parse_fn: F) -> ParseResult
    where
        F: FnOnce(&mut Parser) -> ParseResult,
    {
        self.push_resync(kind);
        match parse_fn(self) {
            Ok(expr) => {
                self.pop_resync();
                Ok(expr)
            }
            Err(resync) => {
                if self.current_token_kind() == kind {
                    Ok(Expr::SyntaxError(*resync.0))
                } else {
                    Err(resync)
                }
            }
        }
    }

    /// Builds a syntax error and resynchronizes the stream.
    ///
    /// Skips to the first token whose kind is anywhere in the resync stack,
    /// pops the stack down to (and including) the innermost entry for that
    /// kind, and collects the tokens between that entry's start position and
    /// the resync point.
    pub fn syntax_error(&mut self, error: ErrorImpl, token: Token) -> Resync {
        let last = self.tokens.len() - 1;
        while self.pos < last
            && !self
                .resync_stack
                .iter()
                .any(|(kind, _)| *kind == self.tokens[self.pos].kind)
        {
            self.pos += 1;
        }

        let resync_kind = self.tokens[self.pos].kind;
        let mut start = self.pos;
        while let Some((kind, position)) = self.resync_stack.pop() {
            if kind == resync_kind {
                start = position;
                break;
            }
        }

        let tokens = self.tokens[start.min(self.pos)..self.pos].to_vec();
        let span = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.span.merge(&last.span),
            _ => token.span.clone(),
        };

        Resync(Box::new(SyntaxErrorExpr {
            id: self.advance_id(),
            error: Error::new(error, token.span.start.clone()),
            error_token: token,
            tokens,
            span,
        }))
    }
}

/// Parses a stream of tokens into an expression tree.
///
/// This is the main entry point for parsing. It never fails: malformed
/// input yields `SyntaxError` nodes, and if an error cannot be contained by
/// any enclosing construct the whole result is a single `SyntaxError`.
/// Input left over after the expression is such an error.
pub fn parse(tokens: Vec<Token>) -> Expr {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let result = parse_expr(&mut parser, BindingPower::Default).and_then(|expr| {
        parser.expect(TokenKind::EOF)?;
        Ok(expr)
    });

    match result {
        Ok(expr) => expr,
        Err(resync) => Expr::SyntaxError(*resync.0),
    }
}
