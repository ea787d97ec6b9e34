use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::Error, Span};

lazy_static! {
    /// Reserved words, keyed by first character and then by the full word.
    pub static ref RESERVED_LOOKUP: HashMap<char, HashMap<&'static str, TokenKind>> = {
        let mut map: HashMap<char, HashMap<&'static str, TokenKind>> = HashMap::new();
        map.entry('f').or_default().insert("fn", TokenKind::Fn);
        map.entry('i').or_default().insert("in", TokenKind::In);
        map.entry('l').or_default().insert("let", TokenKind::Let);
        map
    };
}

/// Returns the keyword kind for `identifier` if it is exactly a reserved word.
pub fn reserved_lookup(identifier: &str) -> Option<TokenKind> {
    let first = identifier.chars().next()?;
    RESERVED_LOOKUP.get(&first)?.get(identifier).copied()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Number,

    Equals, // =
    Arrow,  // =>
    Plus,
    Dash,
    Star,
    Slash,

    Semicolon,
    Ellipsis,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Meta, // ^^

    // Reserved
    Let,
    Fn,
    In,

    EOF,
    Whitespace,
    Error,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text. For quoted identifiers this is the unescaped interior.
    pub value: String,
    pub span: Span,
    pub quoted: bool,
    pub error: Option<Error>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// Number of source bytes this token consumed.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line description used by `--tokens` output.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::Identifier, TokenKind::Number]) {
            if self.quoted {
                format!("{} [{}]", self.kind, self.value)
            } else {
                format!("{} ({})", self.kind, self.value)
            }
        } else if let Some(error) = &self.error {
            format!("{} ({:?}: {})", self.kind, self.value, error)
        } else if self.kind == TokenKind::Whitespace {
            format!("{} ({:?})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
