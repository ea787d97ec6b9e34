/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Expr` tagged union, node identity and the generic tree walker
/// - expressions: Definitions for each node kind
pub mod ast;
pub mod expressions;
