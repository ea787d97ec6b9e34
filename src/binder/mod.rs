//! Name resolution.
//!
//! The binder walks a parsed tree once, opening a scope for every `let`
//! and `fn` node, and records what each identifier refers to in a side
//! table keyed by node id. The tree itself is left untouched.
//!
//! Scopes live in an arena and point at their parent by id. The global
//! scope is the root of every chain.

pub mod binder;
pub mod scope;

#[cfg(test)]
mod tests;
