//! Lexical analysis for Guion source text.
//!
//! The lexer converts raw text into a complete token stream. It never fails:
//! malformed input is recovered locally into error-kind tokens, each paired
//! with a diagnostic record, so downstream consumers always see the whole
//! input.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, Lexer};
pub use tokens::{Keyword, Token, TokenKind, TypeName, RESERVED};
