//! Error types for tree construction.
//!
//! Every builder in the crate fails through the same `Error` type:
//!
//! - `InvalidStructure` for missing required fields and malformed collections
//! - `TypeIncompatible` for operands the target language would reject
//! - `UnsupportedFieldKind` when no default value exists for a field
//! - `DuplicateDeclaration` for name collisions inside one declaration
//!
//! Errors name the node kind being built so composers can report them directly.

pub mod errors;
