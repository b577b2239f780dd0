//! Recursive descent parser for Guion token streams.
//!
//! The parser always produces a tree in tolerant mode: a syntax error is
//! recorded as a diagnostic, tokens are discarded up to the synchronizing
//! terminal (the statement-ending `;`, consumed; `Fin` and end of input are
//! hard stops), a placeholder [`Stmt::Error`] marks the discarded statement,
//! and parsing resumes. Strict mode turns the first syntax error into a
//! typed [`ParseFailure`] carrying the line, the offending lexeme, and the
//! literal source line.
//!
//! Grammar:
//!
//! ```text
//! program      := header? declaration* block
//! header       := 'Script' IDENT
//! declaration  := TYPE IDENT (',' IDENT)* ';'
//!              |  TYPE IDENT '=' expression ';'
//! block        := 'Inicio' statement* 'Fin'
//! statement    := declaration | assignment | print-call | read-call
//!              |  expression ';'
//! assignment   := IDENT (':=' | '=') expression ';'
//! print-call   := PRINT-KEYWORD '(' (TEXT | IDENT) ')' ';'
//! read-call    := READ-KEYWORD '(' IDENT ')' ';'
//! expression   := term (('+'|'-') term)*
//! term         := factor (('*'|'/') factor)*
//! factor       := '(' expression ')' | IDENT | NUMBER | TEXT
//! ```
//!
//! `+`/`-` bind looser than `*`/`/`; both levels are left-associative and
//! parentheses override. Error-kind tokens from the lexer are filtered out
//! before parsing: they already carry their own diagnostics and must not
//! cascade into syntax errors.

use std::fmt;

use crate::guion::ast::{AssignOp, BinOp, Expr, Header, PrintArg, Program, Stmt};
use crate::guion::diagnostics::{Diagnostic, DiagnosticKind};
use crate::guion::lexer::{Keyword, Token, TokenKind, TypeName};

/// Typed failure returned by strict-mode parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub message: String,
    pub line: Option<u32>,
    pub source_line: Option<String>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "linea {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Marker for productions abandoned mid-parse; the statement loop converts
/// it into a [`Stmt::Error`] after resynchronizing.
struct Recover;

pub struct Parser<'t> {
    tokens: Vec<&'t Token>,
    current: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens: tokens.iter().filter(|t| !t.kind.is_error()).collect(),
            current: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Tolerant parse: always yields a program, plus the run's syntax
    /// diagnostics.
    pub fn parse(mut self) -> (Program, Vec<Diagnostic>) {
        let program = self.program();
        (program, self.diagnostics)
    }

    // ========================================================================
    // Productions
    // ========================================================================

    fn program(&mut self) -> Program {
        let header = self.header();
        let mut decls = Vec::new();
        while matches!(self.peek(), Some(TokenKind::Type(_))) {
            decls.push(self.statement());
        }
        let block = self.block();
        Program {
            header,
            decls,
            block,
        }
    }

    fn header(&mut self) -> Option<Header> {
        if !self.eat(&TokenKind::Programa) {
            return None;
        }
        match self.peek() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.advance();
                Some(Header { name })
            }
            _ => {
                self.error_here("se esperaba el nombre del programa");
                Some(Header {
                    name: String::new(),
                })
            }
        }
    }

    fn block(&mut self) -> Vec<Stmt> {
        if !self.eat(&TokenKind::Keyword(Keyword::Inicio)) {
            self.error_here("se esperaba 'Inicio'");
        }
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.error_here("se esperaba 'Fin'");
                    break;
                }
                Some(TokenKind::Keyword(Keyword::Fin)) => {
                    self.advance();
                    break;
                }
                Some(_) => stmts.push(self.statement()),
            }
        }
        stmts
    }

    /// Parse one statement, resynchronizing to the next statement boundary
    /// on failure.
    fn statement(&mut self) -> Stmt {
        match self.try_statement() {
            Ok(stmt) => stmt,
            Err(Recover) => {
                self.synchronize();
                Stmt::Error
            }
        }
    }

    fn try_statement(&mut self) -> Result<Stmt, Recover> {
        match self.peek() {
            Some(TokenKind::Type(_)) => self.declaration(),
            Some(TokenKind::Keyword(k)) if k.is_print() => self.print_call(),
            Some(TokenKind::Keyword(k)) if k.is_read() => self.read_call(),
            Some(TokenKind::Ident(_)) if self.assign_op_follows() => self.assignment(),
            Some(_) => {
                let value = self.expression()?;
                self.expect_semi()?;
                Ok(Stmt::Expr(value))
            }
            None => {
                self.error_here("se esperaba una sentencia");
                Err(Recover)
            }
        }
    }

    fn declaration(&mut self) -> Result<Stmt, Recover> {
        let ty = self.take_type()?;
        let first = self.expect_ident()?;
        if self.eat(&TokenKind::Equal) {
            let value = self.expression()?;
            self.expect_semi()?;
            return Ok(Stmt::DeclInit {
                ty,
                name: first,
                value,
            });
        }
        let mut names = vec![first];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_ident()?);
        }
        self.expect_semi()?;
        Ok(Stmt::Decl { ty, names })
    }

    fn assignment(&mut self) -> Result<Stmt, Recover> {
        let target = self.expect_ident()?;
        let op = match self.peek() {
            Some(TokenKind::Equal) => {
                self.advance();
                AssignOp::Equal
            }
            Some(TokenKind::Assign) => {
                self.advance();
                AssignOp::ColonEqual
            }
            _ => {
                self.error_here("se esperaba '=' o ':='");
                return Err(Recover);
            }
        };
        let value = self.expression()?;
        self.expect_semi()?;
        Ok(Stmt::Assign { target, op, value })
    }

    fn print_call(&mut self) -> Result<Stmt, Recover> {
        let builtin = self.take_keyword()?;
        self.expect(&TokenKind::LParen, "se esperaba '('")?;
        let arg = match self.peek() {
            Some(TokenKind::Text(s)) => {
                let s = s.clone();
                self.advance();
                PrintArg::Text(s)
            }
            Some(TokenKind::Ident(s)) => {
                let s = s.clone();
                self.advance();
                PrintArg::Ident(s)
            }
            _ => {
                self.error_here("se esperaba una cadena o un identificador");
                return Err(Recover);
            }
        };
        self.expect(&TokenKind::RParen, "se esperaba ')'")?;
        self.expect_semi()?;
        Ok(Stmt::Print { builtin, arg })
    }

    fn read_call(&mut self) -> Result<Stmt, Recover> {
        let builtin = self.take_keyword()?;
        self.expect(&TokenKind::LParen, "se esperaba '('")?;
        let target = self.expect_ident()?;
        self.expect(&TokenKind::RParen, "se esperaba ')'")?;
        self.expect_semi()?;
        Ok(Stmt::Read { builtin, target })
    }

    fn expression(&mut self) -> Result<Expr, Recover> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, Recover> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, Recover> {
        match self.peek() {
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen, "se esperaba ')'")?;
                Ok(inner)
            }
            Some(TokenKind::Ident(s)) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Ident(s))
            }
            Some(&TokenKind::Number(n)) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Some(TokenKind::Text(s)) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Text(s))
            }
            _ => {
                self.error_here("se esperaba una expresion");
                Err(Recover)
            }
        }
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.current).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.current).copied();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    /// Consume the current token when its kind equals `kind` (payload-free
    /// kinds only).
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Whether the token after the current one is an assignment operator.
    fn assign_op_follows(&self) -> bool {
        matches!(
            self.tokens.get(self.current + 1).map(|t| &t.kind),
            Some(TokenKind::Equal) | Some(TokenKind::Assign)
        )
    }

    fn take_type(&mut self) -> Result<TypeName, Recover> {
        match self.peek() {
            Some(&TokenKind::Type(ty)) => {
                self.advance();
                Ok(ty)
            }
            _ => {
                self.error_here("se esperaba un tipo de dato");
                Err(Recover)
            }
        }
    }

    fn take_keyword(&mut self) -> Result<Keyword, Recover> {
        match self.peek() {
            Some(&TokenKind::Keyword(k)) => {
                self.advance();
                Ok(k)
            }
            _ => {
                self.error_here("se esperaba una palabra reservada");
                Err(Recover)
            }
        }
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<(), Recover> {
        if self.eat(kind) {
            Ok(())
        } else {
            self.error_here(message);
            Err(Recover)
        }
    }

    fn expect_semi(&mut self) -> Result<(), Recover> {
        self.expect(&TokenKind::Semi, "se esperaba ';'")
    }

    fn expect_ident(&mut self) -> Result<String, Recover> {
        match self.peek() {
            Some(TokenKind::Ident(s)) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => {
                self.error_here("se esperaba un identificador");
                Err(Recover)
            }
        }
    }

    // ========================================================================
    // Error recording and recovery
    // ========================================================================

    /// Record a syntax diagnostic at the current position.
    fn error_here(&mut self, message: &str) {
        match self.tokens.get(self.current) {
            Some(token) => self.diagnostics.push(Diagnostic::with_message(
                token.line,
                token.lexeme(),
                DiagnosticKind::UnexpectedToken,
                message,
            )),
            None => {
                let line = self.tokens.last().map(|t| t.line).unwrap_or(1);
                self.diagnostics.push(Diagnostic::with_message(
                    line,
                    "",
                    DiagnosticKind::UnexpectedEndOfInput,
                    message,
                ));
            }
        }
    }

    /// Discard tokens up to the next statement boundary: the statement
    /// terminator `;` is consumed; `Fin` and end of input are left in place.
    fn synchronize(&mut self) {
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::Semi => {
                    self.advance();
                    return;
                }
                TokenKind::Keyword(Keyword::Fin) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Tolerant parse (the default discipline): always returns a program,
/// possibly partial or the minimal stub, plus syntax diagnostics.
pub fn parse(tokens: &[Token]) -> (Program, Vec<Diagnostic>) {
    Parser::new(tokens).parse()
}

/// Strict parse: the first syntax error aborts with a [`ParseFailure`]
/// carrying the offending line and the literal source line for context.
pub fn parse_strict(tokens: &[Token], source: &str) -> Result<Program, ParseFailure> {
    let (program, diagnostics) = parse(tokens);
    match diagnostics.iter().find(|d| !d.kind.is_lexical()) {
        None => Ok(program),
        Some(first) => Err(ParseFailure {
            message: if first.lexeme.is_empty() {
                first.message.clone()
            } else {
                format!("{} (se encontro '{}')", first.message, first.lexeme)
            },
            line: Some(first.line),
            source_line: source
                .lines()
                .nth(first.line.saturating_sub(1) as usize)
                .map(str::to_string),
        }),
    }
}
