use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A diagnostic attached to a token or node.
///
/// Errors in this crate are data: lexer error tokens, syntax error nodes and
/// unresolved identifiers each carry one, and later stages decide what to do
/// with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedSymbol => "UnrecognisedSymbol",
            ErrorImpl::UnrecognisedDot => "UnrecognisedDot",
            ErrorImpl::UnterminatedQuotedIdentifier => "UnterminatedQuotedIdentifier",
            ErrorImpl::EmptyQuotedIdentifier => "EmptyQuotedIdentifier",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::CannotParseExpression { .. } => "CannotParseExpression",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnresolvedIdentifier { .. } => "UnresolvedIdentifier",
            ErrorImpl::NotImplemented => "NotImplemented",
            ErrorImpl::UncompilableOperator { .. } => "UncompilableOperator",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedSymbol => ErrorTip::Suggestion(String::from(
                "quote unusual identifiers with '[' and ']'",
            )),
            ErrorImpl::UnrecognisedDot => {
                ErrorTip::Suggestion(String::from("did you mean '...'?"))
            }
            ErrorImpl::UnterminatedQuotedIdentifier => {
                ErrorTip::Suggestion(String::from("add a closing ']'"))
            }
            ErrorImpl::EmptyQuotedIdentifier => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("expected {}", expected))
            }
            ErrorImpl::CannotParseExpression { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::NestingTooDeep { .. } => {
                ErrorTip::Suggestion(String::from("name inner parts with `let`"))
            }
            ErrorImpl::UnresolvedIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "declare `{}` with `let` or as a function parameter",
                identifier
            )),
            ErrorImpl::NotImplemented => ErrorTip::None,
            ErrorImpl::UncompilableOperator { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unrecognized symbol. (Did you mean to quote this as an identifier, with '[]'?)")]
    UnrecognisedSymbol,
    #[error("Unrecognized symbol. (Did you mean '...'?)")]
    UnrecognisedDot,
    #[error("Expected to find a ']' to close the quoted identifier.")]
    UnterminatedQuotedIdentifier,
    #[error("Empty quoted identifiers ('[]') are not allowed.")]
    EmptyQuotedIdentifier,
    #[error("Parse error: expected {expected} but got {received}")]
    UnexpectedToken { expected: String, received: String },
    #[error("Cannot parse '{token}' as an expression")]
    CannotParseExpression { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("Expression is nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
    #[error("Cannot find the definition of [{identifier}].")]
    UnresolvedIdentifier { identifier: String },
    #[error("Not Implemented")]
    NotImplemented,
    #[error("Uncompilable operator: {operator}")]
    UncompilableOperator { operator: String },
}
