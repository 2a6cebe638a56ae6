//! Raw token definition.
//!
//! `RawToken` is the logos-derived tokenizer output before string interning
//! and conversion to `TokenKind`.

use logos::{Lexer, Logos};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    /// `/* ... */`
    #[token("/*", block_comment)]
    BlockComment(Closing),

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    // Operators
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // Keywords
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fun")]
    Fun,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    /// Digits with an optional fraction. A trailing `.` without digits is
    /// left for the `Dot` token.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// `"..."`, newlines allowed.
    #[token("\"", string_literal)]
    String(Closing),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Whether a delimited token found its closing delimiter before end of
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closing {
    Found,
    Missing,
}

/// Consume the rest of a delimited token up to and including `close`, or to
/// end of input when `close` never appears.
fn consume_until(lex: &mut Lexer<'_, RawToken>, close: &str) -> Closing {
    let rest = lex.remainder();
    if let Some(end) = rest.find(close) {
        lex.bump(end + close.len());
        Closing::Found
    } else {
        lex.bump(rest.len());
        Closing::Missing
    }
}

/// Block comment body after `/*`. Comments do not nest.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Closing {
    consume_until(lex, "*/")
}

/// String body after the opening quote.
fn string_literal(lex: &mut Lexer<'_, RawToken>) -> Closing {
    consume_until(lex, "\"")
}
