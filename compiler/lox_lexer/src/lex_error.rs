//! Lexer error types.

use lox_diagnostic::{token_location, Diagnostic, ErrorCode};
use lox_ir::Span;

/// A lexer error. Lexing continues after every error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    /// 1-based line the error is reported on.
    pub line: u32,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that starts no token.
    UnexpectedCharacter(char),
    /// Input ended inside a string literal.
    UnterminatedString,
    /// Input ended inside a block comment.
    UnterminatedComment,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, line: u32) -> Self {
        LexError { span, line, kind }
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(_) => "Unexpected character.",
            LexErrorKind::UnterminatedString => "Unterminated string.",
            LexErrorKind::UnterminatedComment => "Unterminated comment.",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(_) => ErrorCode::E0001,
            LexErrorKind::UnterminatedString => ErrorCode::E0002,
            LexErrorKind::UnterminatedComment => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.message())
            .with_line(self.line)
            .with_label(self.span, "");
        match self.kind {
            LexErrorKind::UnexpectedCharacter(c) => {
                diag.with_location(token_location(&c.to_string(), false))
            }
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedComment => {
                diag.with_location(token_location("", true))
            }
        }
    }
}
