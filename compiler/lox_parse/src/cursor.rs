//! Token cursor for navigating the token stream.

use lox_ir::{Span, Token, TokenKind, TokenList};

/// Stand-in returned when the token list is empty.
static EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::DUMMY, 1);

/// Cursor over a token list.
///
/// The position never moves past the final `Eof`, so `current()` is always
/// a valid token.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position, used to check that a loop made progress.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF_TOKEN)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// The most recently consumed token (the first token before any advance).
    #[inline]
    pub fn previous(&self) -> &'a Token {
        let index = self.pos.saturating_sub(1);
        self.tokens.get(index).unwrap_or(&EOF_TOKEN)
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.previous().span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token's variant, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_variant(kind)
    }

    /// Consume the current token and return it. Stays on `Eof`.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Source text of a token, for error locations.
    pub fn lexeme(&self, token: &Token) -> &'a str {
        self.tokens.lexeme(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_ir::{Name, StringInterner};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_advance_stops_at_eof() {
        let interner = StringInterner::new();
        let tokens = lox_lexer::lex("a;", &interner).tokens;
        let mut cursor = Cursor::new(&tokens);

        assert!(cursor.check(&TokenKind::Ident(Name::EMPTY)));
        cursor.advance();
        assert!(cursor.eat(&TokenKind::Semicolon).is_some());
        assert!(cursor.is_at_end());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.previous().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_empty_list_reads_as_eof() {
        let _interner = StringInterner::new();
        let tokens = TokenList::default();
        let cursor = Cursor::new(&tokens);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_span(), Span::DUMMY);
    }

    #[test]
    fn test_check_ignores_payload() {
        let interner = StringInterner::new();
        let tokens = lox_lexer::lex("someName", &interner).tokens;
        let cursor = Cursor::new(&tokens);
        assert!(cursor.check(&TokenKind::Ident(Name::EMPTY)));
        assert_eq!(cursor.lexeme(cursor.current()), "someName");
    }
}
