use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    lex(source, &interner)
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_lex_var_decl() {
    let interner = StringInterner::new();
    let out = lex("var x = 42;", &interner);

    assert!(!out.has_errors());
    assert_eq!(out.tokens.len(), 6);
    assert_eq!(out.tokens[0].kind, TokenKind::Var);
    assert_eq!(out.tokens[1].kind, TokenKind::Ident(interner.intern("x")));
    assert_eq!(out.tokens[2].kind, TokenKind::Equal);
    assert_eq!(out.tokens[3].kind, TokenKind::number(42.0));
    assert_eq!(out.tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(out.tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_maximal_munch_operators() {
    assert_eq!(
        kinds("! != = == < <= > >="),
        vec![
            TokenKind::Bang,
            TokenKind::BangEqual,
            TokenKind::Equal,
            TokenKind::EqualEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numbers_with_and_without_fraction() {
    assert_eq!(
        kinds("12 3.25"),
        vec![
            TokenKind::number(12.0),
            TokenKind::number(3.25),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    assert_eq!(
        kinds("12."),
        vec![TokenKind::number(12.0), TokenKind::Dot, TokenKind::Eof]
    );
    assert_eq!(
        kinds(".5"),
        vec![TokenKind::Dot, TokenKind::number(5.0), TokenKind::Eof]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let interner = StringInterner::new();
    let out = lex("class classy fun funny this", &interner);
    let got: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Class,
            TokenKind::Ident(interner.intern("classy")),
            TokenKind::Fun,
            TokenKind::Ident(interner.intern("funny")),
            TokenKind::This,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_contents_and_lexeme() {
    let interner = StringInterner::new();
    let out = lex(r#""hello world""#, &interner);
    assert_eq!(
        out.tokens[0].kind,
        TokenKind::String(interner.intern("hello world"))
    );
    assert_eq!(out.tokens.lexeme(&out.tokens[0]), "\"hello world\"");
}

#[test]
fn test_multiline_string_advances_line() {
    let interner = StringInterner::new();
    let out = lex("\"a\nb\" x", &interner);
    assert!(!out.has_errors());
    assert_eq!(out.tokens[0].kind, TokenKind::String(interner.intern("a\nb")));
    assert_eq!(out.tokens[0].line, 1);
    assert_eq!(out.tokens[1].line, 2);
}

#[test]
fn test_lines_are_one_based() {
    let interner = StringInterner::new();
    let out = lex("a\n\nb", &interner);
    let lines: Vec<_> = out.tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 3, 3]);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("1 // two\n/* three\n four */ 5"),
        vec![TokenKind::number(1.0), TokenKind::number(5.0), TokenKind::Eof]
    );
}

#[test]
fn test_block_comments_do_not_nest() {
    assert_eq!(
        kinds("/* a /* b */ c */"),
        vec![
            TokenKind::Ident(StringInterner::new().intern("c")),
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_slash_is_division_outside_comments() {
    assert_eq!(
        kinds("6 / 2"),
        vec![
            TokenKind::number(6.0),
            TokenKind::Slash,
            TokenKind::number(2.0),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_unterminated_string_is_reported() {
    let interner = StringInterner::new();
    let out = lex("var s = \"abc\n", &interner);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
    assert_eq!(out.errors[0].message(), "Unterminated string.");
    assert_eq!(out.errors[0].line, 2);
    assert_eq!(out.tokens.iter().last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_unterminated_comment_is_reported() {
    let interner = StringInterner::new();
    let out = lex("1 /* never closed", &interner);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedComment);
    assert_eq!(out.tokens.len(), 2);
}

#[test]
fn test_unexpected_characters_keep_scanning() {
    let interner = StringInterner::new();
    let out = lex("a @ b #", &interner);
    let errors: Vec<_> = out.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        errors,
        vec![
            LexErrorKind::UnexpectedCharacter('@'),
            LexErrorKind::UnexpectedCharacter('#'),
        ]
    );
    assert_eq!(out.tokens.len(), 3);
}

#[test]
fn test_error_diagnostic() {
    let interner = StringInterner::new();
    let out = lex("\n  ?", &interner);
    let diags: Vec<_> = out.diagnostics().collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].to_string(),
        "[line 2] error[E0001] at '?': Unexpected character."
    );
}

#[test]
fn test_empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("  \t\r\n"), vec![TokenKind::Eof]);
}

proptest! {
    #[test]
    fn lexing_never_panics_and_ends_with_eof(source in "\\PC*") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner);
        prop_assert_eq!(out.tokens.iter().last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn token_lines_never_decrease(source in "[a-z0-9 \\n\"/*+.;]{0,64}") {
        let interner = StringInterner::new();
        let out = lex(&source, &interner);
        let lines: Vec<u32> = out.tokens.iter().map(|t| t.line).collect();
        prop_assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    }
}
