//! # guion
//!
//! A lexer and parser for the Guion teaching language.
//!
//! Guion is a small imperative language with Spanish keywords: a `Script`
//! program header, an `Inicio`/`Fin` block, typed declarations, assignment,
//! print/read built-ins, and arithmetic expressions. This crate turns raw
//! source text into a complete error-tolerant token stream and a structural
//! parse tree, accumulates diagnostics for malformed input, and renders the
//! four analysis artifacts consumed by downstream tooling.
//!
//! The pipeline ends there: no type checking, no execution, no code
//! generation.

pub mod guion;
