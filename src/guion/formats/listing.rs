//! Token listing artifact (`progfte.tok`).
//!
//! One fixed-width line per token; error-kind tokens append their
//! diagnostic message in parentheses after the kind name.

use crate::guion::lexer::{Token, TokenKind};
use crate::guion::diagnostics::DiagnosticKind;

/// Render the token listing for a complete token stream.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "Line: {:<7} Lexeme: {:<15} Token: {}",
            token.line,
            token.lexeme(),
            token.kind.name()
        ));
        if let Some(note) = error_note(&token.kind) {
            out.push_str(&format!(" ({})", note));
        }
        out.push('\n');
    }
    out
}

/// The parenthesized diagnostic suffix for error-kind tokens.
fn error_note(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::BadIdent(_) => Some(DiagnosticKind::MalformedIdentifier.message()),
        TokenKind::BadNumIdent(_) => Some(DiagnosticKind::MalformedNumericIdentifier.message()),
        TokenKind::BadText(_) => Some(DiagnosticKind::UnterminatedText.message()),
        TokenKind::Illegal(_) => Some(DiagnosticKind::IllegalCharacter.message()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guion::lexer::tokenize;

    #[test]
    fn test_one_line_per_token() {
        let (tokens, _) = tokenize("Script P\nInicio\nFin\n");
        let listing = render(&tokens);
        assert_eq!(listing.lines().count(), 4);
    }

    #[test]
    fn test_fixed_width_columns() {
        let (tokens, _) = tokenize("x");
        let listing = render(&tokens);
        assert_eq!(listing, "Line: 1       Lexeme: x               Token: IDENTIFICADOR\n");
    }

    #[test]
    fn test_error_token_carries_note() {
        let (tokens, _) = tokenize("3x");
        let listing = render(&tokens);
        assert!(listing.contains("ERROR_IDENTIFICADOR_NUM (identificador no puede iniciar con digito)"));
    }

    #[test]
    fn test_line_numbers_advance() {
        let (tokens, _) = tokenize("a\nb\n");
        let listing = render(&tokens);
        let lines: Vec<&str> = listing.lines().collect();
        assert!(lines[0].starts_with("Line: 1"));
        assert!(lines[1].starts_with("Line: 2"));
    }
}
