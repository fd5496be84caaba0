//! Typed syntax trees for generated Java client libraries.
//!
//! Trees are built bottom-up through validating builders in `ast`, checked against
//! the rules in `type_checker` as they are built, and rendered by `writer`. The
//! `composer` module holds the default-value helpers composers share.

#![allow(clippy::module_inception)]

pub mod ast;
pub mod composer;
pub mod errors;
pub mod type_checker;
pub mod writer;

extern crate regex;
