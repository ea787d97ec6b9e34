use std::collections::HashMap;

use crate::{ast::ast::Expr, lexer::tokens::TokenKind};

use super::{
    expr::*,
    parser::{ParseResult, Parser},
};

/// Precedence levels, lowest first.
///
/// Juxtaposition (`Apply`) binds tighter than every named operator.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Meta,
    Let,
    Record,
    Fn,
    Additive,
    Multiplicative,
    Apply,
}

pub type NUDHandler = fn(&mut Parser) -> ParseResult;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> ParseResult;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals, symbols and other expression starters
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Number, parse_literal_expr);
    parser.nud(TokenKind::Fn, parse_fn_expr);
    parser.nud(TokenKind::Let, parse_let_expr);
    parser.nud(TokenKind::OpenCurly, parse_record_expr);
    parser.nud(TokenKind::Ellipsis, parse_not_implemented_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Error, parse_error_token_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Metadata
    parser.led(TokenKind::Meta, BindingPower::Meta, parse_binary_expr);

    // Anything that can start an expression and isn't already an infix
    // operator continues an expression as function application.
    let prefix_kinds: Vec<TokenKind> = parser.get_nud_lookup().keys().copied().collect();
    for kind in prefix_kinds {
        if !parser.get_led_lookup().contains_key(&kind) {
            parser.led(kind, BindingPower::Apply, parse_apply_expr);
        }
    }
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
