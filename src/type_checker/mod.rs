//! Type rules for tree construction.
//!
//! Builders in `ast` call into this module while validating their inputs:
//!
//! - `relational` decides whether two operands may be compared with `==` or `!=`
//! - `validator` holds assignability, boolean conditions and the missing-element
//!   check shared by every builder that takes a collection
//!
//! Nothing here evaluates code. The rules only cover the subset of the Java
//! type system the generator itself relies on.

pub mod relational;
pub mod validator;

#[cfg(test)]
mod tests;
