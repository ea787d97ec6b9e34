//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an expression tree. It uses a Pratt parser with NUD (null
//! denotation) and LED (left denotation) lookup tables and binding powers
//! for precedence, and handles:
//!
//! - `let` bindings, `fn` literals, records and parentheses
//! - Prefix and infix arithmetic, and the `^^` meta operator
//! - Function application by juxtaposition
//! - Error recovery by resynchronizing on construct terminators

pub mod expr;
pub mod lookups;
pub mod parser;
