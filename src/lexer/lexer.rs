use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{reserved_lookup, Token, TokenKind};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z$_][a-zA-Z0-9$_]*").unwrap();
    static ref NUMBER_PATTERN: Regex =
        Regex::new("^[0-9]+(?:\\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").unwrap();
}

pub type LexHandler = fn(&mut Lexer);

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Offsets past `u32::MAX` saturate.
    fn position(&self, offset: usize) -> Position {
        Position(
            u32::try_from(offset).unwrap_or(u32::MAX),
            Rc::clone(&self.file),
        )
    }

    /// Span from the current position up to `end`.
    fn span_to(&self, end: usize) -> Span {
        Span {
            start: self.position(self.pos),
            end: self.position(end),
        }
    }

    /// Pushes an error token covering `len` bytes from the current position.
    fn push_error(&mut self, len: usize, error: ErrorImpl, quoted: bool) {
        let end = self.pos + len;
        let error = Error::new(error, self.position(self.pos));
        self.push(MK_TOKEN!(
            TokenKind::Error,
            self.source[self.pos..end].to_string(),
            self.span_to(end),
            quoted: quoted,
            error: Some(error)
        ));
        self.advance_n(len);
    }
}

pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '$' || c == '_'
}

fn whitespace_handler(lexer: &mut Lexer) {
    let len = lexer
        .remainder()
        .find(|c: char| !is_whitespace(c))
        .unwrap_or(lexer.remainder().len());

    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span_to(lexer.pos + len);
    lexer.push(MK_TOKEN!(TokenKind::Whitespace, value, span));
    lexer.advance_n(len);
}

fn number_handler(lexer: &mut Lexer) {
    let matched = match NUMBER_PATTERN.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return lexer.push_error(1, ErrorImpl::UnrecognisedSymbol, false),
    };

    let span = lexer.span_to(lexer.pos + matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn symbol_handler(lexer: &mut Lexer) {
    let value = match IDENTIFIER_PATTERN.find(lexer.remainder()) {
        Some(value) => value.as_str().to_string(),
        None => return lexer.push_error(1, ErrorImpl::UnrecognisedSymbol, false),
    };

    let kind = reserved_lookup(&value).unwrap_or(TokenKind::Identifier);
    let span = lexer.span_to(lexer.pos + value.len());
    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
}

/// Scans a `[...]` identifier. Returns the byte length consumed and whether
/// the closing bracket was found.
fn scan_quoted_identifier(text: &str) -> (usize, bool) {
    let mut chars = text.char_indices().skip(1);

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, ']')) => {}
                Some((next, _)) => return (next, false),
                None => return (text.len(), false),
            },
            ']' => return (offset + 1, true),
            _ => {}
        }
    }

    (text.len(), false)
}

fn quoted_identifier_handler(lexer: &mut Lexer) {
    let (len, terminated) = scan_quoted_identifier(lexer.remainder());

    if !terminated {
        return lexer.push_error(len, ErrorImpl::UnterminatedQuotedIdentifier, true);
    }
    if len <= 2 {
        return lexer.push_error(len, ErrorImpl::EmptyQuotedIdentifier, true);
    }

    let value = lexer.remainder()[1..len - 1].replace('\\', "");
    let span = lexer.span_to(lexer.pos + len);
    lexer.push(MK_TOKEN!(TokenKind::Identifier, value, span, quoted: true, error: None));
    lexer.advance_n(len);
}

fn dot_handler(lexer: &mut Lexer) {
    if lexer.remainder().starts_with("...") {
        let span = lexer.span_to(lexer.pos + 3);
        lexer.push(MK_TOKEN!(TokenKind::Ellipsis, String::from("..."), span));
        lexer.advance_n(3);
    } else {
        lexer.push_error(1, ErrorImpl::UnrecognisedDot, false);
    }
}

fn equals_handler(lexer: &mut Lexer) {
    if lexer.remainder().starts_with("=>") {
        MK_DEFAULT_HANDLER!(TokenKind::Arrow, "=>")(lexer)
    } else {
        MK_DEFAULT_HANDLER!(TokenKind::Equals, "=")(lexer)
    }
}

fn caret_handler(lexer: &mut Lexer) {
    if lexer.remainder().starts_with("^^") {
        MK_DEFAULT_HANDLER!(TokenKind::Meta, "^^")(lexer)
    } else {
        lexer.push_error(1, ErrorImpl::UnrecognisedSymbol, false);
    }
}

fn unrecognised_handler(lexer: &mut Lexer) {
    let len = lexer.at().len_utf8();
    lexer.push_error(len, ErrorImpl::UnrecognisedSymbol, false);
}

/// Picks the handler for a token starting with `c`.
fn handler_for(c: char) -> LexHandler {
    match c {
        c if is_whitespace(c) => whitespace_handler,
        '(' => MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
        ')' => MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")"),
        '{' => MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{"),
        '}' => MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}"),
        '*' => MK_DEFAULT_HANDLER!(TokenKind::Star, "*"),
        '/' => MK_DEFAULT_HANDLER!(TokenKind::Slash, "/"),
        '+' => MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
        '-' => MK_DEFAULT_HANDLER!(TokenKind::Dash, "-"),
        ';' => MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
        '.' => dot_handler,
        '=' => equals_handler,
        '^' => caret_handler,
        '[' => quoted_identifier_handler,
        '0'..='9' => number_handler,
        c if is_identifier_start(c) => symbol_handler,
        _ => unrecognised_handler,
    }
}

/// Converts source text into tokens.
///
/// Never fails: malformed input produces `TokenKind::Error` tokens carrying a
/// diagnostic. Whitespace is kept as tokens, and the result always ends with
/// exactly one `TokenKind::EOF` token.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let handler = handler_for(lex.at());
        handler(&mut lex);
    }

    let span = lex.span_to(lex.pos);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    lex.tokens
}
