//! Raw token to `TokenKind` conversion.

use lox_ir::{StringInterner, TokenKind};

use crate::raw_token::RawToken;

/// Convert a raw token to a `TokenKind`, interning identifiers and string
/// contents.
///
/// Trivia (newlines, comments) never reaches this function.
pub(crate) fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Number(value) => TokenKind::number(value),
        RawToken::String(_) => {
            let content = slice
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(slice);
            TokenKind::String(interner.intern(content))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Star => TokenKind::Star,

        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::Equal => TokenKind::Equal,
        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,

        RawToken::And => TokenKind::And,
        RawToken::Class => TokenKind::Class,
        RawToken::Else => TokenKind::Else,
        RawToken::False => TokenKind::False,
        RawToken::Fun => TokenKind::Fun,
        RawToken::For => TokenKind::For,
        RawToken::If => TokenKind::If,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Or => TokenKind::Or,
        RawToken::Print => TokenKind::Print,
        RawToken::Return => TokenKind::Return,
        RawToken::Super => TokenKind::Super,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::Var => TokenKind::Var,
        RawToken::While => TokenKind::While,

        // Filtered out by `lex` before conversion.
        RawToken::Newline | RawToken::LineComment | RawToken::BlockComment(_) => TokenKind::Eof,
    }
}
