//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Quoted identifiers and their errors
//! - Numeric literals (integers, fractions, exponents)
//! - Operators and punctuation
//! - Whitespace and lossless span coverage
//! - Error tokens

use super::{
    lexer::tokenize,
    tokens::{reserved_lookup, Token, TokenKind},
};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source, Some("test.nib".to_string()))
}

/// Tokens with whitespace removed.
fn significant(source: &str) -> Vec<Token> {
    lex(source)
        .into_iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
        .collect()
}

fn reconstruct(source: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| &source[token.span.start.0 as usize..token.span.end.0 as usize])
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = significant("let fn in");

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Fn);
    assert_eq!(tokens[2].kind, TokenKind::In);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_superstrings_are_identifiers() {
    let tokens = lex("let");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Let);

    let tokens = lex("lets");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "lets");

    let tokens = significant("fns inside l");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_reserved_lookup() {
    assert_eq!(reserved_lookup("let"), Some(TokenKind::Let));
    assert_eq!(reserved_lookup("fn"), Some(TokenKind::Fn));
    assert_eq!(reserved_lookup("in"), Some(TokenKind::In));
    assert_eq!(reserved_lookup("if"), None);
    assert_eq!(reserved_lookup(""), None);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = significant("foo bar baz_123 _underscore $dollar CamelCase");

    let values: Vec<&str> = tokens[..6].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["foo", "bar", "baz_123", "_underscore", "$dollar", "CamelCase"]
    );
    assert!(tokens[..6]
        .iter()
        .all(|t| t.kind == TokenKind::Identifier && !t.quoted));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_quoted_identifier() {
    let tokens = lex("[foo\\]bar]");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo]bar");
    assert!(tokens[0].quoted);
    assert_eq!(tokens[0].len(), 10);
}

#[test]
fn test_quoted_keyword_is_identifier() {
    let tokens = lex("[let]");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "let");
}

#[test]
fn test_empty_quoted_identifier() {
    let tokens = lex("[]");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "[]");
    assert_eq!(
        tokens[0].error.as_ref().unwrap().to_string(),
        "Empty quoted identifiers ('[]') are not allowed."
    );
}

#[test]
fn test_unterminated_quoted_identifier() {
    let tokens = lex("[foo");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "[foo");
    assert_eq!(tokens[0].span.end.0, 4);
    assert_eq!(
        tokens[0].error.as_ref().unwrap().to_string(),
        "Expected to find a ']' to close the quoted identifier."
    );
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_bad_escape_in_quoted_identifier() {
    let tokens = lex("[a\\b]");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "[a\\");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "b");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = significant("42 3.14 0 100.5 3.5e-10 1E5 2e+3");

    let values: Vec<&str> = tokens[..7].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["42", "3.14", "0", "100.5", "3.5e-10", "1E5", "2e+3"]
    );
    assert!(tokens[..7].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_number_followed_by_lone_dot() {
    let tokens = lex("3.");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "3");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, ".");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_exponent_requires_digits() {
    let tokens = lex("3e");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "3");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "e");
}

#[test]
fn test_whole_exponent_literal_is_one_token() {
    let tokens = lex("3.5e-10");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].len(), 7);
}

#[test]
fn test_tokenize_operators() {
    let tokens = significant("= => + - * / ; ( ) { } ^^ ...");

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Equals,
            TokenKind::Arrow,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Semicolon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Meta,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_arrow_is_maximal_munch() {
    let tokens = lex("==>");

    assert_eq!(tokens[0].kind, TokenKind::Equals);
    assert_eq!(tokens[1].kind, TokenKind::Arrow);
}

#[test]
fn test_dots() {
    let tokens = lex("..");
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(
        tokens[0].error.as_ref().unwrap().to_string(),
        "Unrecognized symbol. (Did you mean '...'?)"
    );

    let tokens = lex("....");
    assert_eq!(tokens[0].kind, TokenKind::Ellipsis);
    assert_eq!(tokens[1].kind, TokenKind::Error);
}

#[test]
fn test_unrecognized_symbol() {
    let tokens = significant("let x = @");

    assert_eq!(tokens[3].kind, TokenKind::Error);
    assert_eq!(tokens[3].value, "@");
    assert_eq!(tokens[4].kind, TokenKind::EOF);

    let tokens = lex("^");
    assert_eq!(tokens[0].kind, TokenKind::Error);
}

#[test]
fn test_unrecognized_multibyte_symbol() {
    let tokens = lex("é");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "é");
    assert_eq!(tokens[0].len(), 2);
}

#[test]
fn test_unicode_whitespace() {
    let source = "a\u{00A0}\u{2028}\u{FEFF}\tb";
    let tokens = lex(source);

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].value, "\u{00A0}\u{2028}\u{FEFF}\t");
    assert_eq!(tokens[2].value, "b");
}

#[test]
fn test_empty_input() {
    let tokens = lex("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert!(tokens[0].is_empty());
}

#[test]
fn test_spans_reconstruct_source() {
    let sources = [
        "let x = 1 in x",
        "  let   x   =   42  ",
        "[foo\\]bar] + [] * [unterminated",
        "fn a b => a / b; @ # é ... . 3. 4.5e+",
        "{ a = 1; } ^^ ^ \u{3000}",
    ];

    for source in sources {
        let tokens = lex(source);
        assert_eq!(reconstruct(source, &tokens), source);
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(),
            1
        );
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
    }
}

#[test]
fn test_offsets_strictly_increase() {
    let tokens = lex("let x = [y] in x + 3.5");

    for pair in tokens.windows(2) {
        assert_eq!(pair[0].span.end.0, pair[1].span.start.0);
        assert!(pair[0].span.start.0 < pair[1].span.start.0);
    }
}
