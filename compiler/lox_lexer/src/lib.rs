//! Lexer for Lox using logos with string interning.
//!
//! [`lex`] never fails: unexpected characters and unterminated strings or
//! comments are recorded as [`LexError`]s and scanning carries on, so one
//! pass reports every lexical problem in the source.

mod convert;
mod lex_error;
mod raw_token;

use logos::Logos;
use lox_diagnostic::Diagnostic;
use lox_ir::{Span, StringInterner, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

use convert::convert_token;
use raw_token::{Closing, RawToken};

/// Lexer output: tokens (always terminated by `Eof`) plus errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(LexError::to_diagnostic)
    }
}

#[inline]
fn count_newlines(text: &str) -> u32 {
    let count = text.bytes().filter(|&b| b == b'\n').count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Lex source text into tokens.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput {
        tokens: TokenList::for_source(source),
        errors: Vec::new(),
    };
    let mut line: u32 = 1;
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        let start_line = line;
        line = line.saturating_add(count_newlines(slice));

        match token_result {
            Ok(
                RawToken::Newline
                | RawToken::LineComment
                | RawToken::BlockComment(Closing::Found),
            ) => {}
            Ok(RawToken::BlockComment(Closing::Missing)) => {
                output.errors.push(LexError::new(
                    LexErrorKind::UnterminatedComment,
                    span,
                    line,
                ));
            }
            Ok(RawToken::String(Closing::Missing)) => {
                output
                    .errors
                    .push(LexError::new(LexErrorKind::UnterminatedString, span, line));
            }
            Ok(raw) => {
                let kind = convert_token(raw, slice, interner);
                output.tokens.push(Token::new(kind, span, start_line));
            }
            Err(()) => {
                let c = slice.chars().next().unwrap_or('\u{fffd}');
                output.errors.push(LexError::new(
                    LexErrorKind::UnexpectedCharacter(c),
                    span,
                    start_line,
                ));
            }
        }
    }

    let eof_span = Span::from_range(source.len()..source.len());
    output
        .tokens
        .push(Token::new(TokenKind::Eof, eof_span, line));

    tracing::debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "lexed"
    );
    output
}

#[cfg(test)]
mod tests;
