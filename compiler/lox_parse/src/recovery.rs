//! Panic-mode error recovery.
//!
//! After a syntax error the parser skips tokens until a statement boundary:
//! just past a `;`, or just before a keyword that starts a declaration or
//! statement.

use super::cursor::Cursor;
use lox_ir::TokenKind;

/// A set of token kinds, one bit per `TokenKind::discriminant_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder for const contexts).
    #[inline]
    #[must_use]
    #[allow(clippy::needless_pass_by_value)] // const fn builder for static initialization
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.discriminant_index()))
    }

    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }
}

/// Keywords that begin a declaration or statement.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Class)
    .with(TokenKind::Fun)
    .with(TokenKind::Var)
    .with(TokenKind::For)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Print)
    .with(TokenKind::Return);

/// Skip to the next statement boundary.
///
/// Always consumes the offending token first, so the parser makes progress
/// even when the error token itself starts a statement.
pub fn synchronize(cursor: &mut Cursor<'_>) {
    cursor.advance();

    while !cursor.is_at_end() {
        if matches!(cursor.previous().kind, TokenKind::Semicolon) {
            return;
        }
        if STMT_START.contains(cursor.current_kind()) {
            return;
        }
        cursor.advance();
    }
}
