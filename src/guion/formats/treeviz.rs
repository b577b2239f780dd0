//! Tree dump artifact (`progfte.arb`).
//!
//! Depth-indented rendering of the parse tree, two spaces per level.
//! Binary-operator and assignment nodes render as their symbolic form;
//! identifier, number, and text leaves render as `KIND(value)`; the
//! remaining nodes render their structural tag.

use crate::guion::ast::{Expr, PrintArg, Program, Stmt};

/// Render the tree dump for a parsed program.
pub fn render(program: &Program) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, "PROGRAM");

    if let Some(header) = &program.header {
        push_line(&mut out, 1, "HEADER");
        if !header.name.is_empty() {
            push_line(&mut out, 2, &format!("ID({})", header.name));
        }
    }

    for decl in &program.decls {
        write_stmt(&mut out, decl, 1);
    }

    push_line(&mut out, 1, "BLOCK");
    for stmt in &program.block {
        write_stmt(&mut out, stmt, 2);
    }

    out
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Decl { ty, names } => {
            push_line(out, depth, "DECL");
            push_line(out, depth + 1, &format!("TYPE({})", ty.as_str()));
            for name in names {
                push_line(out, depth + 1, &format!("ID({})", name));
            }
        }
        Stmt::DeclInit { ty, name, value } => {
            push_line(out, depth, "DECL_INIT");
            push_line(out, depth + 1, &format!("TYPE({})", ty.as_str()));
            push_line(out, depth + 1, &format!("ID({})", name));
            write_expr(out, value, depth + 1);
        }
        Stmt::Assign { target, op, value } => {
            push_line(out, depth, op.symbol());
            push_line(out, depth + 1, &format!("ID({})", target));
            write_expr(out, value, depth + 1);
        }
        Stmt::Print { arg, .. } => {
            push_line(out, depth, "PRINT");
            match arg {
                PrintArg::Text(s) => push_line(out, depth + 1, &format!("TEXT({})", s)),
                PrintArg::Ident(s) => push_line(out, depth + 1, &format!("ID({})", s)),
            }
        }
        Stmt::Read { target, .. } => {
            push_line(out, depth, "READ");
            push_line(out, depth + 1, &format!("ID({})", target));
        }
        Stmt::Expr(value) => write_expr(out, value, depth),
        Stmt::Error => push_line(out, depth, "ERROR"),
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    match expr {
        Expr::Binary { op, lhs, rhs } => {
            push_line(out, depth, op.symbol());
            write_expr(out, lhs, depth + 1);
            write_expr(out, rhs, depth + 1);
        }
        Expr::Ident(s) => push_line(out, depth, &format!("ID({})", s)),
        Expr::Number(n) => push_line(out, depth, &format!("NUMBER({})", n)),
        Expr::Text(s) => push_line(out, depth, &format!("TEXT({})", s)),
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(text);
    out.push('\n');
}
