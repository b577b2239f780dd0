//! Syntactic analysis for Guion token streams.
//!
//! Two disciplines are available: [`parse`] (tolerant, the default) always
//! returns a tree and accumulates diagnostics; [`parse_strict`] fails on the
//! first syntax error with line and source context.

pub mod grammar;

pub use grammar::{parse, parse_strict, ParseFailure, Parser};
