use super::*;
use larch_ir::Name;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    let (tokens, errors) = lex(source, &interner);
    assert_eq!(errors, vec![]);
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn punctuation_and_operators() {
    assert_eq!(
        kinds("( ) { } , . - + ; / *"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Minus,
            TokenKind::Plus,
            TokenKind::Semicolon,
            TokenKind::Slash,
            TokenKind::Star,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn two_character_operators_win_over_one() {
    assert_eq!(
        kinds("! != = == < <= > >="),
        vec![
            TokenKind::Bang,
            TokenKind::BangEq,
            TokenKind::Eq,
            TokenKind::EqEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex("var anda and", &interner);
    assert_eq!(errors, vec![]);
    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Ident(interner.intern("anda")));
    assert_eq!(tokens[2].kind, TokenKind::And);
}

#[test]
fn number_radixes() {
    assert_eq!(
        kinds("42 1.5 0xff 0b101 0o17 0x1.8"),
        vec![
            TokenKind::number(42.0),
            TokenKind::number(1.5),
            TokenKind::number(255.0),
            TokenKind::number(5.0),
            TokenKind::number(15.0),
            TokenKind::number(1.5),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn malformed_numbers_are_reported_and_skipped() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex("0b12 7", &interner);
    assert_eq!(tokens.len(), 2); // the 7 and Eof
    assert_eq!(tokens[0].kind, TokenKind::number(7.0));
    assert!(matches!(errors[0], LexError::MalformedNumber { .. }));

    let (_, errors) = lex("0x", &interner);
    assert!(matches!(errors[0], LexError::MalformedNumber { .. }));
}

#[test]
fn string_literals_are_unescaped_and_interned() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex(r#""a\nb""#, &interner);
    assert_eq!(errors, vec![]);
    assert_eq!(tokens[0].kind, TokenKind::Str(interner.intern("a\nb")));
}

#[test]
fn invalid_escape_substitutes_and_reports() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex(r#""a\qb""#, &interner);
    assert_eq!(tokens[0].kind, TokenKind::Str(interner.intern("a0b")));
    assert!(matches!(errors[0], LexError::InvalidEscape { escape: 'q', .. }));
}

#[test]
fn unterminated_string_is_reported() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex("\"abc", &interner);
    assert_eq!(tokens.len(), 1); // just Eof
    assert!(matches!(errors[0], LexError::UnterminatedString { .. }));
}

#[test]
fn newlines_are_tokens_and_advance_the_line() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex("1\n2", &interner);
    assert_eq!(errors, vec![]);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].kind, TokenKind::Newline);
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[2].kind, TokenKind::number(2.0));
}

#[test]
fn comments_are_skipped_to_end_of_line() {
    assert_eq!(
        kinds("1 // the rest is ignored ;;;\n2"),
        vec![
            TokenKind::number(1.0),
            TokenKind::Newline,
            TokenKind::number(2.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_is_reported_and_skipped() {
    let interner = StringInterner::new();
    let (tokens, errors) = lex("1 @ 2", &interner);
    assert_eq!(tokens.len(), 3);
    assert!(matches!(errors[0], LexError::UnexpectedCharacter { .. }));
}

#[test]
fn lexemes_carry_source_text() {
    let interner = StringInterner::new();
    let (tokens, _) = lex("x + y", &interner);
    assert_eq!(tokens[1].lexeme, interner.intern("+"));
    assert_ne!(tokens[1].lexeme, Name::EMPTY);
}

#[test]
fn columns_are_one_based_per_line() {
    let interner = StringInterner::new();
    let (tokens, _) = lex("ab cd\nef", &interner);
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 4));
    assert_eq!((tokens[3].line, tokens[3].column), (2, 1));
}
