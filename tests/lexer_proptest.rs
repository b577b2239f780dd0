//! Property-based tests for the Guion lexer.
//!
//! These pin the lexer's total-function contract: it terminates on any
//! input, line numbers never decrease, and quote handling either strips
//! delimiters or preserves the partial run.

use proptest::prelude::*;

use guion::guion::lexer::{tokenize, TokenKind};

proptest! {
    #[test]
    fn test_tokenize_terminates_and_lines_are_monotonic(source in any::<String>()) {
        let (tokens, _) = tokenize(&source);
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        prop_assert_eq!(lines, sorted);
    }

    #[test]
    fn test_every_anomaly_has_a_diagnostic(source in any::<String>()) {
        let (tokens, diagnostics) = tokenize(&source);
        let error_tokens = tokens.iter().filter(|t| t.kind.is_error()).count();
        prop_assert_eq!(error_tokens, diagnostics.len());
    }

    #[test]
    fn test_closed_quotes_strip_delimiters(content in "[a-z ]{0,20}") {
        let source = format!("\"{}\"", content);
        let (tokens, diagnostics) = tokenize(&source);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(&tokens[0].kind, &TokenKind::Text(content));
        prop_assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_quote_preserves_partial_run(content in "[a-z]{0,20}") {
        let source = format!("\"{}", content);
        let (tokens, diagnostics) = tokenize(&source);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(&tokens[0].kind, &TokenKind::BadText(content));
        prop_assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_tokenizing_twice_is_identical(source in any::<String>()) {
        let first = tokenize(&source);
        let second = tokenize(&source);
        prop_assert_eq!(first, second);
    }
}
