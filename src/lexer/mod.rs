//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a flat stream of tokens for parsing. It handles:
//!
//! - Identifiers, including `[quoted]` identifiers
//! - Reserved words (`let`, `fn`, `in`)
//! - Numeric literals with fractions and exponents
//! - Operators and punctuation
//! - Whitespace, kept as tokens so spans cover the whole input
//! - Error tokens for malformed input, so lexing never fails

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
