//! Token table artifact (`progfte.tab`).
//!
//! Enumerates only the valid tokens (error kinds are excluded), terminating
//! at and including the `Fin` keyword. Each row carries a 1-based index and
//! the token's numeric reference code; kinds outside the closed code table
//! get the default code 999.

use crate::guion::lexer::{Keyword, Token, TokenKind};

/// Default reference code for kinds absent from the closed table.
pub const DEFAULT_CODE: u16 = 999;

/// Numeric reference code for a token kind.
pub fn reference_code(kind: &TokenKind) -> u16 {
    match kind {
        TokenKind::Programa => 100,
        TokenKind::Type(_) => 200,
        TokenKind::Ident(_) => 300,
        TokenKind::Number(_) => 400,
        TokenKind::Keyword(Keyword::Inicio) => 1,
        TokenKind::Keyword(Keyword::Fin) => 2,
        TokenKind::Keyword(Keyword::ImprimirNumero) => 10,
        TokenKind::Keyword(Keyword::ImprimirCadena) => 11,
        TokenKind::Keyword(Keyword::ImprimirBoleano) => 12,
        TokenKind::Keyword(Keyword::LeerNumero) => 13,
        TokenKind::Keyword(Keyword::LeerCadena) => 14,
        TokenKind::Keyword(Keyword::LeerBoleano) => 15,
        TokenKind::LParen => 50,
        TokenKind::RParen => 51,
        TokenKind::Plus => 60,
        TokenKind::Minus => 61,
        TokenKind::Star => 62,
        TokenKind::Slash => 63,
        TokenKind::Equal => 70,
        TokenKind::Comma => 80,
        TokenKind::Semi => 81,
        TokenKind::Colon => 82,
        TokenKind::Text(_) => 500,
        _ => DEFAULT_CODE,
    }
}

/// Render the token table.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<20} {:<50} {:<15}\n",
        "No", "Lexema", "Token", "Referencia"
    ));
    out.push_str(&"-".repeat(93));
    out.push('\n');

    let mut rows = Vec::new();
    for token in tokens {
        if token.is_end_keyword() {
            rows.push(token);
            break;
        }
        if !token.kind.is_error() {
            rows.push(token);
        }
    }

    for (index, token) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:<8} {:<20} {:<50} {:<15}\n",
            index + 1,
            token.lexeme(),
            token.kind.name(),
            reference_code(&token.kind)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guion::lexer::tokenize;

    #[test]
    fn test_header_and_separator() {
        let table = render(&[]);
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("No "));
        assert!(header.contains("Lexema"));
        assert!(header.contains("Referencia"));
        assert_eq!(lines.next().unwrap(), "-".repeat(93));
    }

    #[test]
    fn test_rows_are_indexed_from_one() {
        let (tokens, _) = tokenize("Script P\nInicio\nFin\n");
        let table = render(&tokens);
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("1 "));
        assert!(rows[3].starts_with("4 "));
    }

    #[test]
    fn test_error_tokens_are_excluded() {
        let (tokens, _) = tokenize("x 3y z");
        let table = render(&tokens);
        assert!(!table.contains("3y"));
        assert!(!table.contains("ERROR"));
        assert_eq!(table.lines().count(), 2 + 2); // header + rule + x + z
    }

    #[test]
    fn test_table_stops_at_fin() {
        let (tokens, _) = tokenize("Inicio Fin x y");
        let table = render(&tokens);
        assert!(table.contains("PALABRA_RESERVADA_FIN"));
        assert!(!table.contains("IDENTIFICADOR"));
    }

    #[test]
    fn test_reference_codes() {
        assert_eq!(reference_code(&TokenKind::Programa), 100);
        assert_eq!(reference_code(&TokenKind::Keyword(Keyword::Inicio)), 1);
        assert_eq!(reference_code(&TokenKind::Semi), 81);
        assert_eq!(reference_code(&TokenKind::Text("x".into())), 500);
        // kinds outside the closed table default to 999
        assert_eq!(reference_code(&TokenKind::Assign), DEFAULT_CODE);
        assert_eq!(
            reference_code(&TokenKind::Keyword(Keyword::Mientras)),
            DEFAULT_CODE
        );
    }

    #[test]
    fn test_row_format_is_fixed_width() {
        let (tokens, _) = tokenize("Fin");
        let table = render(&tokens);
        let row = table.lines().nth(2).unwrap();
        assert_eq!(
            row,
            format!("{:<8} {:<20} {:<50} {:<15}", 1, "Fin", "PALABRA_RESERVADA_FIN", 2)
        );
    }
}
