//! Code generation module.
//!
//! This module lowers a parsed and bound tree to JavaScript. It handles:
//!
//! - `let` scopes, materialized as records of eval-once properties
//! - Function literals, optionally wrapped for automatic currying
//! - Arithmetic, application and records
//! - Runtime-throw stand-ins for anything that cannot be compiled
//! - The runtime prelude and whole-program wrapper

pub mod compiler;
pub mod expr;
pub mod options;
pub mod stdlib;
pub mod writer;
