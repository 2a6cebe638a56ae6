//! Resolution errors.

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::Span;

/// A static scoping error found by the resolver.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResolveError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub line: u32,
    /// `at 'name'`
    pub location: String,
}

impl ResolveError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        lexeme: &str,
        span: Span,
        line: u32,
    ) -> Self {
        ResolveError {
            code,
            message: message.into(),
            span,
            line,
            location: format!("at '{lexeme}'"),
        }
    }

    pub fn already_declared(lexeme: &str, span: Span, line: u32) -> Self {
        Self::new(
            ErrorCode::E2001,
            "Variable with this name already declared in this scope.",
            lexeme,
            span,
            line,
        )
    }

    pub fn read_in_own_initializer(lexeme: &str, span: Span, line: u32) -> Self {
        Self::new(
            ErrorCode::E2002,
            "Cannot read local variable in its own initializer.",
            lexeme,
            span,
            line,
        )
    }

    pub fn top_level_return(span: Span, line: u32) -> Self {
        Self::new(
            ErrorCode::E2003,
            "Cannot return from top-level code.",
            "return",
            span,
            line,
        )
    }

    pub fn this_outside_class(span: Span, line: u32) -> Self {
        Self::new(
            ErrorCode::E2004,
            "Can't use 'this' outside of a class.",
            "this",
            span,
            line,
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_line(self.line)
            .with_location(self.location.clone())
            .with_label(self.span, "")
    }
}
