//! Java source emission.
//!
//! The writer renders a finished tree in one depth-first pass. Each node kind has
//! exactly one rendering rule, selected by an exhaustive `match`:
//!
//! - `writer`: `JavaWriter`, options, class and method layout
//! - `expr`: inline expression rendering
//! - `stmt`: statements and comments
//! - `imports`: the side table of references seen while writing
//!
//! Trees are never modified while being written, so one tree can be handed to
//! any number of writers.

pub mod expr;
pub mod imports;
pub mod stmt;
pub mod writer;

#[cfg(test)]
mod tests;
