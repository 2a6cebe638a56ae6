//! Tokens produced by the lexer.
//!
//! Literal payloads live in the kind. Numbers are stored as `f64` bits so
//! `TokenKind` stays `Eq + Hash`.

use std::fmt;

use crate::{Name, Span};

/// A lexed token.
///
/// `line` is the 1-based line on which the token starts. The source text is
/// not stored; [`TokenList::lexeme`] slices it out of the lexed source.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Token { kind, span, line }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {} (line {})", self.kind, self.span, self.line)
    }
}

/// Token kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Ident(Name),
    /// String contents without the surrounding quotes.
    String(Name),
    /// Number literal stored as `f64::to_bits`.
    Number(u64),

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Build a number token from its value.
    #[inline]
    pub fn number(value: f64) -> Self {
        TokenKind::Number(value.to_bits())
    }

    /// Numeric payload of a `Number` token.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenKind::Number(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    /// Map a reserved word to its keyword kind.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "fun" => TokenKind::Fun,
            "for" => TokenKind::For,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        })
    }

    /// Stable per-variant index, used by the parser's `TokenSet` bitsets.
    ///
    /// Payload-carrying kinds map to one index regardless of payload.
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::LeftParen => 0,
            TokenKind::RightParen => 1,
            TokenKind::LeftBrace => 2,
            TokenKind::RightBrace => 3,
            TokenKind::Comma => 4,
            TokenKind::Dot => 5,
            TokenKind::Minus => 6,
            TokenKind::Plus => 7,
            TokenKind::Semicolon => 8,
            TokenKind::Slash => 9,
            TokenKind::Star => 10,
            TokenKind::Bang => 11,
            TokenKind::BangEqual => 12,
            TokenKind::Equal => 13,
            TokenKind::EqualEqual => 14,
            TokenKind::Greater => 15,
            TokenKind::GreaterEqual => 16,
            TokenKind::Less => 17,
            TokenKind::LessEqual => 18,
            TokenKind::Ident(_) => 19,
            TokenKind::String(_) => 20,
            TokenKind::Number(_) => 21,
            TokenKind::And => 22,
            TokenKind::Class => 23,
            TokenKind::Else => 24,
            TokenKind::False => 25,
            TokenKind::Fun => 26,
            TokenKind::For => 27,
            TokenKind::If => 28,
            TokenKind::Nil => 29,
            TokenKind::Or => 30,
            TokenKind::Print => 31,
            TokenKind::Return => 32,
            TokenKind::Super => 33,
            TokenKind::This => 34,
            TokenKind::True => 35,
            TokenKind::Var => 36,
            TokenKind::While => 37,
            TokenKind::Eof => 38,
        }
    }

    /// Check whether two kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        self.discriminant_index() == other.discriminant_index()
    }
}

/// Lexer output: an ordered token sequence that always ends with `Eof`,
/// together with the source it was lexed from.
///
/// Only identifiers and string contents are interned. Every other lexeme is
/// read back from the source by span, so a long REPL session does not keep
/// each number literal or operator it has seen.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
    source: String,
}

impl TokenList {
    /// Empty list for `source`, sized for a typical token density.
    pub fn for_source(source: &str) -> Self {
        TokenList {
            tokens: Vec::with_capacity(source.len() / 3 + 1),
            source: source.to_owned(),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Source text of `token`; empty for `Eof`.
    pub fn lexeme(&self, token: &Token) -> &str {
        token.span.slice(&self.source)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_round_trips_bits() {
        let kind = TokenKind::number(2.5);
        assert_eq!(kind.as_number(), Some(2.5));
        assert_eq!(TokenKind::Plus.as_number(), None);
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("this"), Some(TokenKind::This));
        assert_eq!(TokenKind::keyword("whilst"), None);
        assert_eq!(TokenKind::keyword("While"), None);
    }

    #[test]
    fn test_same_variant_ignores_payload() {
        let a = TokenKind::Ident(Name::from_index(1));
        let b = TokenKind::Ident(Name::from_index(7));
        assert!(a.same_variant(&b));
        assert!(!a.same_variant(&TokenKind::String(Name::from_index(1))));
    }

    #[test]
    fn test_lexeme_slices_source() {
        let mut list = TokenList::for_source("x = 12.50;");
        list.push(Token::new(TokenKind::number(12.5), Span::new(4, 9), 1));
        list.push(Token::new(TokenKind::Eof, Span::new(10, 10), 1));
        assert_eq!(list.lexeme(&list[0]), "12.50");
        assert_eq!(list.lexeme(&list[1]), "");
    }

    #[test]
    fn test_discriminants_fit_bitset() {
        assert!(TokenKind::Eof.discriminant_index() < 128);
    }
}
