//! Test support for the Guion pipeline.
//!
//! Small canonical sources plus shortcuts used across the unit and
//! integration suites, so tests exercise the same inputs instead of copying
//! slightly-divergent program text around.

use crate::guion::ast::Program;
use crate::guion::diagnostics::Diagnostic;
use crate::guion::lexer::{tokenize, Token};
use crate::guion::parser::parse;

/// Canonical sample programs.
pub mod samples {
    /// A complete well-formed program exercising every statement form.
    pub const COMPLETE: &str = "\
Script Ejemplo
Entero a, b;
Cadena saludo;
Inicio
    a = 2 + 3 * 4;
    b := (a - 1) / 2;
    saludo = \"hola\";
    ImprimirCadena(saludo);
    ImprimirNumero(a);
    LeerNumero(b);
Fin
";

    /// A program with one anomaly of every lexical error class.
    pub const LEXICAL_ERRORS: &str = "\
Script Errores
Inicio
    3x = 1;
    y+ = 2;
    z = @;
    ImprimirCadena(\"abierta
Fin
";
}

/// Tokenize, discarding diagnostics.
pub fn tokens_of(source: &str) -> Vec<Token> {
    tokenize(source).0
}

/// Tokenize and parse in tolerant mode, returning everything.
pub fn analyze_parts(source: &str) -> (Vec<Token>, Program, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = tokenize(source);
    let (program, syntax) = parse(&tokens);
    diagnostics.extend(syntax);
    (tokens, program, diagnostics)
}
