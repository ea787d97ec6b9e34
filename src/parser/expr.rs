use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ApplyExpr, BinaryExpr, FnExpr, FnParamExpr, IdentifierExpr, LetBindingExpr, LetExpr,
            LiteralExpr, NotImplementedExpr, ParenExpr, RecordExpr, RecordFieldExpr,
            SyntaxErrorExpr, UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{ParseResult, Parser},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult {
    parser.enter_nesting()?;
    let result = parse_nested_expr(parser, bp);
    parser.leave_nesting();
    result
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult {
    // First parse NUD. The token is only consumed by its handler, so on
    // failure the stream can still resynchronize on it.
    let token = parser.current_token().clone();
    let Some(nud) = parser.get_nud_lookup().get(&token.kind).copied() else {
        let error = ErrorImpl::CannotParseExpression {
            token: token.value.clone(),
        };
        return Err(parser.syntax_error(error, token));
    };

    let left = nud(parser)?;
    parse_infix(parser, bp, left)
}

/// While the current token binds tighter than `bp`, continue parsing lhs.
pub fn parse_infix(parser: &mut Parser, bp: BindingPower, mut left: Expr) -> ParseResult {
    while parser.next_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };
        let next_bp = parser.next_binding_power();

        left = led(parser, left, next_bp)?;
        parser.check_depth(&left)?;
    }

    Ok(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> ParseResult {
    let token = parser.advance();
    Ok(Expr::Identifier(IdentifierExpr {
        id: parser.advance_id(),
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_literal_expr(parser: &mut Parser) -> ParseResult {
    let token = parser.current_token().clone();
    let Ok(value) = token.value.parse::<f64>() else {
        let error = ErrorImpl::NumberParseError {
            token: token.value.clone(),
        };
        return Err(parser.syntax_error(error, token));
    };

    let token = parser.advance();
    Ok(Expr::Literal(LiteralExpr {
        id: parser.advance_id(),
        value,
        span: token.span.clone(),
        token,
    }))
}

/// An error token from the lexer becomes a syntax error node in place,
/// without resynchronizing.
pub fn parse_error_token_expr(parser: &mut Parser) -> ParseResult {
    let token = parser.advance();
    let error = token.error.clone().unwrap_or_else(|| {
        Error::new(ErrorImpl::UnrecognisedSymbol, token.span.start.clone())
    });

    Ok(Expr::SyntaxError(SyntaxErrorExpr {
        id: parser.advance_id(),
        error,
        span: token.span.clone(),
        tokens: vec![token.clone()],
        error_token: token,
    }))
}

pub fn parse_not_implemented_expr(parser: &mut Parser) -> ParseResult {
    let token = parser.advance();
    Ok(Expr::NotImplemented(NotImplementedExpr {
        id: parser.advance_id(),
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_fn_expr(parser: &mut Parser) -> ParseResult {
    // fn a b => body
    let fn_token = parser.advance();

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::Arrow {
        let param = parser.parse_with_resync(TokenKind::Arrow, |parser| {
            let token = parser.expect(TokenKind::Identifier)?;
            Ok(Expr::FnParam(FnParamExpr {
                id: parser.advance_id(),
                span: token.span.clone(),
                token,
            }))
        })?;
        params.push(param);
    }

    let arrow = parser.expect(TokenKind::Arrow)?;
    let body = parse_expr(parser, BindingPower::Fn)?;

    Ok(Expr::Fn(FnExpr {
        id: parser.advance_id(),
        span: fn_token.span.merge(body.get_span()),
        fn_token,
        params,
        arrow,
        body: Box::new(body),
    }))
}

/// One `name = value` binding and its `;`, which may be left out right
/// before `in`.
fn parse_let_binding(parser: &mut Parser) -> ParseResult {
    let binding = parser.parse_with_resync(TokenKind::Semicolon, |parser| {
        let decl = parser.expect(TokenKind::Identifier)?;
        let equals = parser.expect(TokenKind::Equals)?;
        let value = parse_expr(parser, BindingPower::Let)?;

        Ok(Expr::LetBinding(LetBindingExpr {
            id: parser.advance_id(),
            span: decl.span.merge(value.get_span()),
            decl,
            equals,
            value: Box::new(value),
        }))
    })?;

    if parser.current_token_kind() != TokenKind::In {
        parser.expect(TokenKind::Semicolon)?;
    }

    Ok(binding)
}

pub fn parse_let_expr(parser: &mut Parser) -> ParseResult {
    // let a = 1; b = 2 in body
    let let_token = parser.advance();

    let mut bindings = vec![];
    while parser.current_token_kind() != TokenKind::In {
        let binding = parser.parse_with_resync(TokenKind::In, parse_let_binding)?;
        bindings.push(binding);
    }

    let in_token = parser.expect(TokenKind::In)?;
    let body = parse_expr(parser, BindingPower::Let)?;

    Ok(Expr::Let(LetExpr {
        id: parser.advance_id(),
        span: let_token.span.merge(body.get_span()),
        let_token,
        bindings,
        in_token,
        body: Box::new(body),
    }))
}

/// One `name = value;` record field. The `;` is required.
fn parse_record_field(parser: &mut Parser) -> ParseResult {
    let field = parser.parse_with_resync(TokenKind::Semicolon, |parser| {
        let decl = parser.expect(TokenKind::Identifier)?;
        let equals = parser.expect(TokenKind::Equals)?;
        let value = parse_expr(parser, BindingPower::Record)?;

        Ok(Expr::RecordField(RecordFieldExpr {
            id: parser.advance_id(),
            span: decl.span.merge(value.get_span()),
            decl,
            equals,
            value: Box::new(value),
        }))
    })?;

    parser.expect(TokenKind::Semicolon)?;
    Ok(field)
}

pub fn parse_record_expr(parser: &mut Parser) -> ParseResult {
    // { a = 1; b = 2; }
    let open = parser.advance();

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field = parser.parse_with_resync(TokenKind::CloseCurly, parse_record_field)?;
        fields.push(field);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Record(RecordExpr {
        id: parser.advance_id(),
        span: open.span.merge(&close.span),
        open,
        fields,
        close,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> ParseResult {
    let open = parser.advance();
    let expr = parser.parse_with_resync(TokenKind::CloseParen, |parser| {
        parse_expr(parser, BindingPower::Default)
    })?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Paren(ParenExpr {
        id: parser.advance_id(),
        span: open.span.merge(&close.span),
        expr: Box::new(expr),
    }))
}

/// Prefix `+`/`-`. The operand is parsed at additive precedence, so
/// `-a * b` is `-(a * b)`.
pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult {
    let operator = parser.advance();
    let expr = parse_expr(parser, BindingPower::Additive)?;

    Ok(Expr::Unary(UnaryExpr {
        id: parser.advance_id(),
        span: operator.span.merge(expr.get_span()),
        operator,
        expr: Box::new(expr),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> ParseResult {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        id: parser.advance_id(),
        span: left.get_span().merge(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

/// Juxtaposition: `left` is the function and the current token starts its
/// argument. Registered for every prefix token that is not also an infix
/// operator.
pub fn parse_apply_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> ParseResult {
    let argument = parse_expr(parser, BindingPower::Apply)?;

    Ok(Expr::Apply(ApplyExpr {
        id: parser.advance_id(),
        span: left.get_span().merge(argument.get_span()),
        callee: Box::new(left),
        argument: Box::new(argument),
    }))
}
