//! Parse error type.

use lox_diagnostic::{token_location, Diagnostic, ErrorCode};
use lox_ir::{Span, Token, TokenKind};

/// A syntax error reported at a token.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub line: u32,
    /// `at 'lexeme'` or `at end`.
    pub location: String,
    /// What was being parsed, e.g. "class body".
    pub context: Option<&'static str>,
}

impl ParseError {
    /// Create an error located at `token`, whose source text is `lexeme`.
    pub fn at_token(
        code: ErrorCode,
        message: impl Into<String>,
        token: &Token,
        lexeme: &str,
    ) -> Self {
        ParseError {
            code,
            message: message.into(),
            span: token.span,
            line: token.line,
            location: token_location(lexeme, matches!(token.kind, TokenKind::Eof)),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_line(self.line)
            .with_location(self.location.clone())
            .with_label(self.span, "");
        match self.context {
            Some(context) => diag.with_note(format!("while parsing {context}")),
            None => diag,
        }
    }
}
