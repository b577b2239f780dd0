//! Debug trace artifact (`progfte.dep`).
//!
//! A single separator-free concatenation of token lexemes up to and
//! including the `Fin` keyword, with one fusion rule: an identifier, an
//! assignment operator, and a value render as one juxtaposed group and the
//! cursor advances by three tokens instead of one.

use crate::guion::lexer::{Token, TokenKind};

/// Render the debug trace.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];

        if token.is_end_keyword() {
            out.push_str("Fin");
            break;
        }

        if i + 2 < tokens.len() && is_fusion(&tokens[i..i + 3]) {
            out.push_str(&tokens[i].lexeme());
            out.push_str(&tokens[i + 1].lexeme());
            out.push_str(&tokens[i + 2].lexeme());
            i += 3;
            continue;
        }

        out.push_str(&token.lexeme());
        i += 1;
    }
    out
}

/// The fusion shape: (identifier, assignment operator, value), where a value
/// is a number, an identifier, or an opening parenthesis.
fn is_fusion(window: &[Token]) -> bool {
    matches!(window[0].kind, TokenKind::Ident(_))
        && matches!(window[1].kind, TokenKind::Equal | TokenKind::Assign)
        && matches!(
            window[2].kind,
            TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen
        )
}
