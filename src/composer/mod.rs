//! Composer helpers that sit directly on top of the tree builders.
//!
//! `default_value` produces placeholder expressions for message fields and fails with
//! `UnsupportedFieldKind` for any field kind it has no rule for.

pub mod default_value;
