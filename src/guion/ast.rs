//! AST for parsed Guion programs.

pub mod node;

pub use node::{AssignOp, BinOp, Expr, Header, PrintArg, Program, Stmt};
