//! Diagnostics shared by every compilation stage.
//!
//! This module defines the error type carried by lexer error tokens,
//! syntax error nodes and unresolved identifiers. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each stage
//! - Error names and suggestions for human output

pub mod errors;
