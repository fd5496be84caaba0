//! Syntax tree for generated Java source.
//!
//! Every node is an immutable value built through a validating constructor or
//! builder. A node that exists is well formed: builders check their own invariants
//! in `build()` and return an `Error` instead of a half-valid node.
//!
//! Submodules:
//! - ast: identifiers, scopes, annotations and comments
//! - reference: named references to concrete and generated classes
//! - types: `TypeNode` and its kinds
//! - values: literal and keyword values
//! - expressions: the `Expr` union and one node per expression form
//! - statements: the `Statement` union, including try-catch blocks
//! - declarations: method and class definitions

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod reference;
pub mod statements;
pub mod types;
pub mod values;
