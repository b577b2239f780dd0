//! Diagnostic records accumulated during one analysis run.
//!
//! Every recovered anomaly, lexical or syntactic, becomes one [`Diagnostic`]
//! so that a single run surfaces all independent problems instead of stopping
//! at the first one. The accumulator is always owned by the run (the lexer or
//! parser struct that produced it) and returned by value; there is no shared
//! or process-wide diagnostic state.

use serde::Serialize;
use std::fmt;

/// Classification of a recovered anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A quoted text run with no closing quote before end of line/input.
    UnterminatedText,
    /// A character (or run of characters) matching no lexical rule.
    IllegalCharacter,
    /// An identifier-shaped token that is not a well-formed identifier.
    MalformedIdentifier,
    /// A digit run immediately followed by identifier characters.
    MalformedNumericIdentifier,
    /// The parser found a token it cannot use at this point.
    UnexpectedToken,
    /// The parser ran out of tokens mid-production.
    UnexpectedEndOfInput,
}

impl DiagnosticKind {
    /// Whether this kind was produced by the lexer (as opposed to the parser).
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnterminatedText
                | DiagnosticKind::IllegalCharacter
                | DiagnosticKind::MalformedIdentifier
                | DiagnosticKind::MalformedNumericIdentifier
        )
    }

    /// Canonical human-readable message for this kind.
    ///
    /// The vocabulary is Spanish to match the artifact files the analysis
    /// produces; downstream tooling greps for these phrases.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedText => "cadena sin comilla de cierre",
            DiagnosticKind::IllegalCharacter => "simbolo no permitido",
            DiagnosticKind::MalformedIdentifier => "identificador mal formado",
            DiagnosticKind::MalformedNumericIdentifier => {
                "identificador no puede iniciar con digito"
            }
            DiagnosticKind::UnexpectedToken => "token inesperado",
            DiagnosticKind::UnexpectedEndOfInput => "fin de entrada inesperado",
        }
    }
}

/// One recovered anomaly: where it happened, what the offending text was,
/// how it is classified, and a human message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub lexeme: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the canonical message for its kind.
    pub fn new(line: u32, lexeme: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            line,
            lexeme: lexeme.into(),
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Create a diagnostic with a custom message (used by the parser to name
    /// the construct it expected).
    pub fn with_message(
        line: u32,
        lexeme: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            lexeme: lexeme.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linea {}: {} ({})", self.line, self.message, self.lexeme)
    }
}
