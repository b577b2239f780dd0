//! Lexer wrapper around the logos automaton.
//!
//! The automaton recognizes raw shapes; this wrapper owns everything that
//! needs run state: line tracking (counting newlines in the skipped gaps
//! between matches), keyword classification, quote stripping, demotion of
//! malformed identifiers, widening of illegal input to a maximal run, and
//! the run's diagnostic accumulator. Tokenizing never fails: every
//! unrecognized span becomes an error-kind token so the stream stays
//! complete and every anomaly is independently visible downstream.

use logos::Logos;

use crate::guion::diagnostics::{Diagnostic, DiagnosticKind};
use crate::guion::lexer::tokens::{RawToken, Token, TokenKind, RESERVED};

/// Characters that terminate an illegal run, besides whitespace.
const ILLEGAL_RUN_DELIMITERS: &[char] = &['(', ')', '=', '+', '-', '*', '/', '"'];

/// Scanner state for one tokenization run.
pub struct Lexer<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the scan to completion, consuming the scanner.
    ///
    /// Always terminates: every iteration either consumes a logos match or
    /// widens an error span by at least one character.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let source = self.source;
        let mut lexer = RawToken::lexer(source);
        let mut line: u32 = 1;
        let mut last_end = 0usize;

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            line += newlines_in(&source[last_end..span.start]);

            match result {
                Ok(raw) => {
                    let slice = &source[span.start..span.end];
                    let kind = self.classify(raw, slice, line);
                    self.tokens.push(Token::new(kind, line));
                    last_end = span.end;
                }
                Err(()) => {
                    // Widen the rejected span to the maximal run up to the
                    // next whitespace or structural delimiter, then skip
                    // past the whole run. Never zero-width.
                    let extra = illegal_run_len(&source[span.end..]);
                    lexer.bump(extra);
                    let run = &source[span.start..span.end + extra];
                    self.diagnostics
                        .push(Diagnostic::new(line, run, DiagnosticKind::IllegalCharacter));
                    self.tokens
                        .push(Token::new(TokenKind::Illegal(run.to_string()), line));
                    last_end = span.end + extra;
                }
            }
        }

        (self.tokens, self.diagnostics)
    }

    /// Convert a raw match into a classified token kind, recording a
    /// diagnostic for the error shapes.
    fn classify(&mut self, raw: RawToken, slice: &str, line: u32) -> TokenKind {
        match raw {
            RawToken::Text => TokenKind::Text(strip_quotes(slice, '"', '"')),
            RawToken::CurlyText => TokenKind::Text(strip_quotes(slice, '“', '”')),
            RawToken::UnterminatedText => {
                let partial = slice.strip_prefix('"').unwrap_or(slice);
                self.diagnostics.push(Diagnostic::new(
                    line,
                    partial,
                    DiagnosticKind::UnterminatedText,
                ));
                TokenKind::BadText(partial.to_string())
            }
            RawToken::UnterminatedCurlyText => {
                let partial = slice.strip_prefix('“').unwrap_or(slice);
                self.diagnostics.push(Diagnostic::new(
                    line,
                    partial,
                    DiagnosticKind::UnterminatedText,
                ));
                TokenKind::BadText(partial.to_string())
            }
            RawToken::NumericIdent => {
                self.diagnostics.push(Diagnostic::new(
                    line,
                    slice,
                    DiagnosticKind::MalformedNumericIdentifier,
                ));
                TokenKind::BadNumIdent(slice.to_string())
            }
            RawToken::OpLeadingIdent | RawToken::OpTrailingIdent => {
                self.diagnostics.push(Diagnostic::new(
                    line,
                    slice,
                    DiagnosticKind::MalformedIdentifier,
                ));
                TokenKind::BadIdent(slice.to_string())
            }
            RawToken::Word => self.classify_word(slice, line),
            RawToken::Number => match slice.parse::<i64>() {
                Ok(value) => TokenKind::Number(value),
                Err(_) => {
                    // Digit run too large for the numeric domain; recover it
                    // as an illegal run so the scan stays total.
                    self.diagnostics.push(Diagnostic::new(
                        line,
                        slice,
                        DiagnosticKind::IllegalCharacter,
                    ));
                    TokenKind::Illegal(slice.to_string())
                }
            },
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Colon => TokenKind::Colon,
        }
    }

    /// Classify identifier-shaped text: reserved-word table first, then the
    /// non-ASCII demotion, then a plain identifier.
    fn classify_word(&mut self, slice: &str, line: u32) -> TokenKind {
        if let Some(kind) = RESERVED.get(slice) {
            return kind.clone();
        }
        if slice
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        {
            self.diagnostics.push(Diagnostic::new(
                line,
                slice,
                DiagnosticKind::MalformedIdentifier,
            ));
            return TokenKind::BadIdent(slice.to_string());
        }
        TokenKind::Ident(slice.to_string())
    }
}

/// Tokenize a source string, returning the complete token stream and the
/// lexical diagnostics of the run.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}

fn newlines_in(text: &str) -> u32 {
    text.bytes().filter(|&b| b == b'\n').count() as u32
}

/// Byte length of the illegal run continuing at `rest`, stopping before the
/// next whitespace or structural delimiter.
fn illegal_run_len(rest: &str) -> usize {
    let mut len = 0;
    for c in rest.chars() {
        if c.is_whitespace() || ILLEGAL_RUN_DELIMITERS.contains(&c) {
            break;
        }
        len += c.len_utf8();
    }
    len
}

fn strip_quotes(slice: &str, open: char, close: char) -> String {
    slice
        .strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
        .unwrap_or(slice)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guion::lexer::tokens::{Keyword, TypeName};

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let (tokens, diagnostics) = tokenize("");
        assert!(tokens.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("Script Ejemplo"),
            vec![TokenKind::Programa, TokenKind::Ident("Ejemplo".into())]
        );
        assert_eq!(
            kinds("Inicio Fin"),
            vec![
                TokenKind::Keyword(Keyword::Inicio),
                TokenKind::Keyword(Keyword::Fin)
            ]
        );
        assert_eq!(
            kinds("Entero x"),
            vec![
                TokenKind::Type(TypeName::Entero),
                TokenKind::Ident("x".into())
            ]
        );
    }

    #[test]
    fn test_symbols_and_assignment_operator() {
        assert_eq!(
            kinds("( ) , ; :"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Semi,
                TokenKind::Colon
            ]
        );
        // ':=' must win over ':' by longest match
        assert_eq!(kinds(":="), vec![TokenKind::Assign]);
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(kinds("123"), vec![TokenKind::Number(123)]);
    }

    #[test]
    fn test_closed_text_strips_quotes() {
        assert_eq!(kinds("\"hola\""), vec![TokenKind::Text("hola".into())]);
        assert_eq!(kinds("“hola”"), vec![TokenKind::Text("hola".into())]);
    }

    #[test]
    fn test_unterminated_text_keeps_partial_content() {
        let (tokens, diagnostics) = tokenize("\"hola");
        assert_eq!(tokens[0].kind, TokenKind::BadText("hola".into()));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedText);
        assert_eq!(diagnostics[0].lexeme, "hola");
    }

    #[test]
    fn test_unterminated_text_stops_at_newline() {
        let (tokens, _) = tokenize("\"hola\nFin");
        assert_eq!(tokens[0].kind, TokenKind::BadText("hola".into()));
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Fin));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_numeric_identifier_beats_number() {
        let (tokens, diagnostics) = tokenize("3x = 1;");
        assert_eq!(tokens[0].kind, TokenKind::BadNumIdent("3x".into()));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::MalformedNumericIdentifier
        );
        assert_eq!(diagnostics[0].lexeme, "3x");
        // the rest of the stream is still produced
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_operator_glued_identifier() {
        let (tokens, diagnostics) = tokenize("x+ /y");
        assert_eq!(tokens[0].kind, TokenKind::BadIdent("x+".into()));
        assert_eq!(tokens[1].kind, TokenKind::BadIdent("/y".into()));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::MalformedIdentifier));
    }

    #[test]
    fn test_spaced_operators_are_not_glued() {
        assert_eq!(
            kinds("x + y"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Plus,
                TokenKind::Ident("y".into())
            ]
        );
    }

    #[test]
    fn test_accented_identifier_is_demoted() {
        let (tokens, diagnostics) = tokenize("años");
        assert_eq!(tokens[0].kind, TokenKind::BadIdent("años".into()));
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedIdentifier);
    }

    #[test]
    fn test_illegal_run_is_maximal_and_advances() {
        let (tokens, diagnostics) = tokenize("@#$ x");
        assert_eq!(tokens[0].kind, TokenKind::Illegal("@#$".into()));
        assert_eq!(tokens[1].kind, TokenKind::Ident("x".into()));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::IllegalCharacter);
    }

    #[test]
    fn test_illegal_run_stops_at_delimiter() {
        let (tokens, _) = tokenize("@#(x)");
        assert_eq!(tokens[0].kind, TokenKind::Illegal("@#".into()));
        assert_eq!(tokens[1].kind, TokenKind::LParen);
    }

    #[test]
    fn test_comments_are_dropped_and_count_lines() {
        let (tokens, diagnostics) = tokenize("x -- comentario\ny");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_line_numbers_across_blank_lines() {
        let (tokens, _) = tokenize("a\n\n\nb");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 4);
    }

    #[test]
    fn test_line_numbers_non_decreasing() {
        let (tokens, _) = tokenize("Script P\nInicio\n  x = 1;\nFin\n");
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
    }

    #[test]
    fn test_every_anomaly_is_reported_independently() {
        let (tokens, diagnostics) = tokenize("3x @ \"abierta");
        let error_count = tokens.iter().filter(|t| t.kind.is_error()).count();
        assert_eq!(error_count, 3);
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_oversized_number_recovers_as_illegal() {
        let (tokens, diagnostics) = tokenize("99999999999999999999");
        assert!(matches!(tokens[0].kind, TokenKind::Illegal(_)));
        assert_eq!(diagnostics.len(), 1);
    }
}
