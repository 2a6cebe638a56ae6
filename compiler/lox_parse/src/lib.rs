//! Recursive descent parser for Lox.
//!
//! Produces a flat syntax tree in an `ExprArena`. Syntax errors are
//! collected, and after each one the parser resynchronizes at the next
//! statement boundary so a single pass reports as many errors as possible.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::{synchronize, TokenSet, STMT_START};

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{ExprArena, Ident, Span, StmtId, Token, TokenKind, TokenList};

/// Maximum number of parameters a function may declare, and arguments a
/// call may pass.
pub const MAX_PARAMS: usize = 8;

/// Parser output: the arena, top-level statements, and syntax errors.
///
/// When `errors` is non-empty the tree is partial and must not be resolved
/// or evaluated.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub statements: Vec<StmtId>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(ParseError::to_diagnostic)
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::with_capacity(tokens.len() * 4),
            errors: Vec::new(),
        }
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &'a Token {
        self.cursor.current()
    }

    #[inline]
    #[allow(dead_code)]
    fn previous(&self) -> &'a Token {
        self.cursor.previous()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        self.cursor.eat(kind)
    }

    /// Consume a token of `kind` or fail with `message` at the current token.
    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(ErrorCode::E1001, message))
        }
    }

    /// Consume an identifier or fail with `message`.
    fn expect_ident(&mut self, message: &str) -> Result<Ident, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Ident::new(name, token.span, token.line))
            }
            _ => Err(self.error_at_current(ErrorCode::E1001, message)),
        }
    }

    fn error_at(&self, code: ErrorCode, message: &str, token: &Token) -> ParseError {
        ParseError::at_token(code, message, token, self.cursor.lexeme(token))
    }

    fn error_at_current(&self, code: ErrorCode, message: &str) -> ParseError {
        self.error_at(code, message, self.current())
    }

    /// Record an error without unwinding.
    fn report(&mut self, error: ParseError) {
        tracing::debug!(line = error.line, message = %error.message, "syntax error");
        self.errors.push(error);
    }

    /// Parse a whole program.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.parse_declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.report(error);
                    synchronize(&mut self.cursor);
                }
            }
        }

        ParseOutput {
            arena: self.arena,
            statements,
            errors: self.errors,
        }
    }
}

/// Parse a token list into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList) -> ParseOutput {
    let output = Parser::new(tokens).parse_program();
    tracing::debug!(
        statements = output.statements.len(),
        errors = output.errors.len(),
        "parsed"
    );
    output
}
