//! Utility macros for the compiler.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed punctuation
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// The short form creates an unquoted token without an error. The long form
/// sets both flags explicitly.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// let bad = MK_TOKEN!(TokenKind::Error, "[".to_string(), span, quoted: true, error: Some(error));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            quoted: false,
            error: None,
        }
    };
    ($kind:expr, $value:expr, $span:expr, quoted: $quoted:expr, error: $error:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            quoted: $quoted,
            error: $error,
        }
    };
}

/// Creates a default lexer handler for a fixed punctuation token.
///
/// Generates a handler that pushes a token with the given kind and advances
/// the lexer position by the literal's length.
///
/// # Example
///
/// ```ignore
/// '(' => MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer| {
            let span = lexer.span_to(lexer.pos + $value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}
