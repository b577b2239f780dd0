//! Token definitions for the Guion language.
//!
//! The raw automaton is defined with the logos derive macro; classification
//! into the public [`TokenKind`] (keyword lookup, malformed-identifier
//! demotion, quote stripping) happens in the lexer wrapper. Rule overlap is
//! resolved by logos' longest-match discipline plus explicit priorities, and
//! the ordering matters: a digit run glued to letters must win over a plain
//! number, and a quoted run must win over the illegal-character fallback.

use logos::Logos;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Raw lexical shapes recognized by the logos automaton.
///
/// These are internal: the wrapper converts every match into a [`TokenKind`],
/// consulting the reserved-word table for `Word` matches.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f\n]+")]
#[logos(skip r"--[^\n]*")]
pub(crate) enum RawToken {
    // Quoted text, straight quotes. The closed form outranks the
    // unterminated prefix by length; neither crosses a newline.
    #[regex(r#""[^"\n]*""#, priority = 6)]
    Text,
    #[regex(r#""[^"\n]*"#, priority = 5)]
    UnterminatedText,

    // Curly-quote variant of the same pair.
    #[regex(r"“[^”\n]*”", priority = 6)]
    CurlyText,
    #[regex(r"“[^”\n]*", priority = 5)]
    UnterminatedCurlyText,

    // A digit run immediately followed by identifier characters ("3x").
    // Must outrank both Number and Word.
    #[regex(r"[0-9]+[a-zA-Z_][a-zA-Z0-9_]*", priority = 10)]
    NumericIdent,

    // An identifier glued to '+' or '/' with no separating whitespace.
    #[regex(r"[+/][a-zA-Z_][a-zA-Z0-9_]*", priority = 9)]
    OpLeadingIdent,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*[+/]", priority = 9)]
    OpTrailingIdent,

    // Identifier-shaped text, accented letters included. Classified against
    // the reserved-word table by the wrapper; a non-ASCII character inside
    // demotes the token to a malformed identifier.
    #[regex(r"[a-zA-ZÀ-ÖØ-öø-ÿ_][a-zA-Z0-9À-ÖØ-öø-ÿ_]*", priority = 3)]
    Word,

    #[regex(r"[0-9]+", priority = 2)]
    Number,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(":=")]
    Assign,
    #[token("=")]
    Equal,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
}

/// Reserved words of the Guion language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Inicio,
    Fin,
    ImprimirNumero,
    ImprimirCadena,
    ImprimirBoleano,
    LeerNumero,
    LeerCadena,
    LeerBoleano,
    Si,
    Entonces,
    Sino,
    Mientras,
    Hacer,
    Verdadero,
    Falso,
}

impl Keyword {
    /// The exact source spelling of this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Inicio => "Inicio",
            Keyword::Fin => "Fin",
            Keyword::ImprimirNumero => "ImprimirNumero",
            Keyword::ImprimirCadena => "ImprimirCadena",
            Keyword::ImprimirBoleano => "ImprimirBoleano",
            Keyword::LeerNumero => "LeerNumero",
            Keyword::LeerCadena => "LeerCadena",
            Keyword::LeerBoleano => "LeerBoleano",
            Keyword::Si => "Si",
            Keyword::Entonces => "Entonces",
            Keyword::Sino => "Sino",
            Keyword::Mientras => "Mientras",
            Keyword::Hacer => "Hacer",
            Keyword::Verdadero => "Verdadero",
            Keyword::Falso => "Falso",
        }
    }

    /// The kind name this keyword shows in the artifact files.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Keyword::Inicio => "PALABRA_RESERVADA_INICIO",
            Keyword::Fin => "PALABRA_RESERVADA_FIN",
            Keyword::ImprimirNumero => "PALABRA_RESERVADA_IMPRIMIR_NUMERO",
            Keyword::ImprimirCadena => "PALABRA_RESERVADA_IMPRIMIR_CADENA",
            Keyword::ImprimirBoleano => "PALABRA_RESERVADA_IMPRIMIR_BOLEANO",
            Keyword::LeerNumero => "PALABRA_RESERVADA_LEER_NUMERO",
            Keyword::LeerCadena => "PALABRA_RESERVADA_LEER_CADENA",
            Keyword::LeerBoleano => "PALABRA_RESERVADA_LEER_BOLEANO",
            Keyword::Si => "PALABRA_RESERVADA_SI",
            Keyword::Entonces => "PALABRA_RESERVADA_ENTONCES",
            Keyword::Sino => "PALABRA_RESERVADA_SINO",
            Keyword::Mientras => "PALABRA_RESERVADA_MIENTRAS",
            Keyword::Hacer => "PALABRA_RESERVADA_HACER",
            Keyword::Verdadero => "PALABRA_RESERVADA_VERDADERO",
            Keyword::Falso => "PALABRA_RESERVADA_FALSO",
        }
    }

    /// Whether this keyword names one of the print built-ins.
    pub fn is_print(&self) -> bool {
        matches!(
            self,
            Keyword::ImprimirNumero | Keyword::ImprimirCadena | Keyword::ImprimirBoleano
        )
    }

    /// Whether this keyword names one of the read built-ins.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Keyword::LeerNumero | Keyword::LeerCadena | Keyword::LeerBoleano
        )
    }
}

/// Data-type names of the Guion language.
///
/// All three display as the single kind `TIPO_DATO` in the artifacts; the
/// concrete name survives as the token's lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeName {
    Entero,
    Cadena,
    Boleano,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Entero => "Entero",
            TypeName::Cadena => "Cadena",
            TypeName::Boleano => "Boleano",
        }
    }
}

/// A classified Guion token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// The program-header keyword `Script`.
    Programa,
    Keyword(Keyword),
    Type(TypeName),
    Ident(String),
    Number(i64),
    /// Quoted text with the delimiting quotes stripped.
    Text(String),
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    /// The two-character assignment operator `:=`.
    Assign,
    Comma,
    Semi,
    Colon,
    /// Malformed identifier (operator-glued or containing non-ASCII).
    BadIdent(String),
    /// Digit-initial identifier shape such as `3x`.
    BadNumIdent(String),
    /// Unterminated quoted text; carries the partial captured run.
    BadText(String),
    /// Input matching no lexical rule; carries the maximal illegal run.
    Illegal(String),
}

impl TokenKind {
    /// The kind name used in the artifact files.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Programa => "PROGRAMA",
            TokenKind::Keyword(k) => k.kind_name(),
            TokenKind::Type(_) => "TIPO_DATO",
            TokenKind::Ident(_) => "IDENTIFICADOR",
            TokenKind::Number(_) => "CONSTANTE",
            TokenKind::Text(_) => "TEXTO",
            TokenKind::LParen => "PAREN_IZQ",
            TokenKind::RParen => "PAREN_DER",
            TokenKind::Plus => "SUMA",
            TokenKind::Minus => "RESTA",
            TokenKind::Star => "MULTIPLICACION",
            TokenKind::Slash => "DIVISION",
            TokenKind::Equal => "IGUAL",
            TokenKind::Assign => "ASIGNACION",
            TokenKind::Comma => "COMA",
            TokenKind::Semi => "PuntoYComa",
            TokenKind::Colon => "DosPuntos",
            TokenKind::BadIdent(_) => "ERROR_IDENTIFICADOR",
            TokenKind::BadNumIdent(_) => "ERROR_IDENTIFICADOR_NUM",
            TokenKind::BadText(_) => "ERROR_TEXTO",
            TokenKind::Illegal(_) => "ERROR_LEXICO",
        }
    }

    /// The literal value rendered into the artifact files.
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Programa => "Script".to_string(),
            TokenKind::Keyword(k) => k.as_str().to_string(),
            TokenKind::Type(t) => t.as_str().to_string(),
            TokenKind::Ident(s)
            | TokenKind::Text(s)
            | TokenKind::BadIdent(s)
            | TokenKind::BadNumIdent(s)
            | TokenKind::BadText(s)
            | TokenKind::Illegal(s) => s.clone(),
            TokenKind::Number(n) => n.to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::Equal => "=".to_string(),
            TokenKind::Assign => ":=".to_string(),
            TokenKind::Comma => ",".to_string(),
            TokenKind::Semi => ";".to_string(),
            TokenKind::Colon => ":".to_string(),
        }
    }

    /// Whether this is one of the error kinds produced by lexical recovery.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TokenKind::BadIdent(_)
                | TokenKind::BadNumIdent(_)
                | TokenKind::BadText(_)
                | TokenKind::Illegal(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token with its source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn lexeme(&self) -> String {
        self.kind.lexeme()
    }

    /// Whether this token ends the analyzed region of the table and trace
    /// artifacts.
    pub fn is_end_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword(Keyword::Fin)
    }
}

/// Fixed mapping from exact keyword spelling to token kind, consulted during
/// identifier classification before defaulting to a plain identifier.
pub static RESERVED: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("Script", TokenKind::Programa);
    for kw in [
        Keyword::Inicio,
        Keyword::Fin,
        Keyword::ImprimirNumero,
        Keyword::ImprimirCadena,
        Keyword::ImprimirBoleano,
        Keyword::LeerNumero,
        Keyword::LeerCadena,
        Keyword::LeerBoleano,
        Keyword::Si,
        Keyword::Entonces,
        Keyword::Sino,
        Keyword::Mientras,
        Keyword::Hacer,
        Keyword::Verdadero,
        Keyword::Falso,
    ] {
        table.insert(kw.as_str(), TokenKind::Keyword(kw));
    }
    for ty in [TypeName::Entero, TypeName::Cadena, TypeName::Boleano] {
        table.insert(ty.as_str(), TokenKind::Type(ty));
    }
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_table_classifies_keywords() {
        assert_eq!(RESERVED.get("Script"), Some(&TokenKind::Programa));
        assert_eq!(
            RESERVED.get("Inicio"),
            Some(&TokenKind::Keyword(Keyword::Inicio))
        );
        assert_eq!(
            RESERVED.get("Entero"),
            Some(&TokenKind::Type(TypeName::Entero))
        );
        assert_eq!(RESERVED.get("inicio"), None); // spelling is exact
        assert_eq!(RESERVED.get("x"), None);
    }

    #[test]
    fn test_kind_names_match_artifact_vocabulary() {
        assert_eq!(TokenKind::Programa.name(), "PROGRAMA");
        assert_eq!(
            TokenKind::Keyword(Keyword::Fin).name(),
            "PALABRA_RESERVADA_FIN"
        );
        assert_eq!(TokenKind::Type(TypeName::Cadena).name(), "TIPO_DATO");
        assert_eq!(TokenKind::Semi.name(), "PuntoYComa");
        assert_eq!(TokenKind::Colon.name(), "DosPuntos");
        assert_eq!(TokenKind::Illegal("@".into()).name(), "ERROR_LEXICO");
    }

    #[test]
    fn test_lexeme_rendering() {
        assert_eq!(TokenKind::Number(42).lexeme(), "42");
        assert_eq!(TokenKind::Assign.lexeme(), ":=");
        assert_eq!(TokenKind::Type(TypeName::Boleano).lexeme(), "Boleano");
        assert_eq!(TokenKind::Text("hola".into()).lexeme(), "hola");
    }

    #[test]
    fn test_error_kind_partition() {
        assert!(TokenKind::BadIdent("x+".into()).is_error());
        assert!(TokenKind::BadNumIdent("3x".into()).is_error());
        assert!(TokenKind::BadText("hola".into()).is_error());
        assert!(TokenKind::Illegal("@".into()).is_error());
        assert!(!TokenKind::Ident("x".into()).is_error());
        assert!(!TokenKind::Text("hola".into()).is_error());
    }

    #[test]
    fn test_print_read_predicates() {
        assert!(Keyword::ImprimirCadena.is_print());
        assert!(!Keyword::ImprimirCadena.is_read());
        assert!(Keyword::LeerNumero.is_read());
        assert!(!Keyword::Inicio.is_print());
    }
}
