//! Larch Lexer
//!
//! Tokenizes Larch source using logos, interning identifiers, string
//! values and lexemes as it goes. Number literals accept `0x`/`0b`/`0o`
//! radix prefixes with an optional fractional part in any base.
//!
//! Newlines are real tokens: the REPL parser treats them as unit
//! boundaries and the token channel's flush predicate fires on them.
//! Lexical errors are collected, never fatal; scanning always reaches
//! `Eof`.

use logos::Logos;

use larch_ir::{StringInterner, Token, TokenKind};

mod cook;
mod error;

pub use error::LexError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
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

    #[token("!=")]
    BangEq,
    #[token("!")]
    Bang,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,

    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
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

    // Numerals. The junk pattern loses ties to the well-formed ones and
    // only wins when trailing garbage makes it strictly longer, which is
    // exactly the malformed case.
    #[regex(r"0x[0-9a-fA-F]+(\.[0-9a-fA-F]+)?", priority = 4)]
    HexNum,
    #[regex(r"0b[01]+(\.[01]+)?", priority = 4)]
    BinNum,
    #[regex(r"0o[0-7]+(\.[0-7]+)?", priority = 4)]
    OctNum,
    #[regex(r"[0-9]+(\.[0-9]+)?", priority = 4)]
    DecNum,
    #[regex(r"[0-9][0-9a-zA-Z_.]*", priority = 2)]
    BadNum,

    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    Str,
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedStr,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Streaming tokenizer. Yields every token of the source, ending with a
/// single `Eof`; errors accumulate on the side.
pub struct Lexer<'a> {
    raw: logos::Lexer<'a, RawToken>,
    interner: &'a StringInterner,
    line: u32,
    line_start: usize,
    errors: Vec<LexError>,
    eof_emitted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Lexer {
            raw: RawToken::lexer(source),
            interner,
            line: 1,
            line_start: 0,
            errors: Vec::new(),
            eof_emitted: false,
        }
    }

    /// Errors reported so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    fn column_at(&self, offset: usize) -> u32 {
        (offset - self.line_start) as u32 + 1
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            self.interner.intern(self.raw.slice()),
            self.line,
            self.column_at(start),
        )
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let Some(result) = self.raw.next() else {
                if self.eof_emitted {
                    return None;
                }
                self.eof_emitted = true;
                let end = self.raw.source().len();
                return Some(Token::eof(self.line, self.column_at(end)));
            };

            let span = self.raw.span();
            let slice = self.raw.slice();
            let (line, column) = (self.line, self.column_at(span.start));

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => {
                    self.errors.push(LexError::UnexpectedCharacter {
                        text: slice.to_owned(),
                        line,
                        column,
                    });
                    continue;
                }
            };

            let kind = match raw {
                RawToken::LineComment => continue,
                RawToken::Newline => {
                    let token = self.token(TokenKind::Newline, span.start);
                    self.line += 1;
                    self.line_start = span.end;
                    return Some(token);
                }

                RawToken::LParen => TokenKind::LParen,
                RawToken::RParen => TokenKind::RParen,
                RawToken::LBrace => TokenKind::LBrace,
                RawToken::RBrace => TokenKind::RBrace,
                RawToken::Comma => TokenKind::Comma,
                RawToken::Dot => TokenKind::Dot,
                RawToken::Minus => TokenKind::Minus,
                RawToken::Plus => TokenKind::Plus,
                RawToken::Semicolon => TokenKind::Semicolon,
                RawToken::Slash => TokenKind::Slash,
                RawToken::Star => TokenKind::Star,

                RawToken::BangEq => TokenKind::BangEq,
                RawToken::Bang => TokenKind::Bang,
                RawToken::EqEq => TokenKind::EqEq,
                RawToken::Eq => TokenKind::Eq,
                RawToken::GtEq => TokenKind::GtEq,
                RawToken::Gt => TokenKind::Gt,
                RawToken::LtEq => TokenKind::LtEq,
                RawToken::Lt => TokenKind::Lt,

                RawToken::And => TokenKind::And,
                RawToken::Class => TokenKind::Class,
                RawToken::Else => TokenKind::Else,
                RawToken::False => TokenKind::False,
                RawToken::For => TokenKind::For,
                RawToken::Fun => TokenKind::Fun,
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

                RawToken::DecNum => TokenKind::number(cook::parse_radix(10, slice)),
                RawToken::HexNum => TokenKind::number(cook::parse_radix(16, &slice[2..])),
                RawToken::BinNum => TokenKind::number(cook::parse_radix(2, &slice[2..])),
                RawToken::OctNum => TokenKind::number(cook::parse_radix(8, &slice[2..])),
                RawToken::BadNum => {
                    self.errors.push(LexError::MalformedNumber {
                        text: slice.to_owned(),
                        line,
                        column,
                    });
                    continue;
                }

                RawToken::Str => {
                    let cooked = cook::unescape(&slice[1..slice.len() - 1]);
                    for escape in cooked.bad_escapes {
                        self.errors.push(LexError::InvalidEscape {
                            escape,
                            line,
                            column,
                        });
                    }
                    TokenKind::Str(self.interner.intern(&cooked.value))
                }
                RawToken::UnterminatedStr => {
                    self.errors.push(LexError::UnterminatedString { line, column });
                    continue;
                }

                RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),
            };

            return Some(self.token(kind, span.start));
        }
    }
}

/// Tokenize an entire source, returning the tokens (terminated by `Eof`)
/// and every lexical error encountered.
pub fn lex(source: &str, interner: &StringInterner) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source, interner);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.into_errors())
}

#[cfg(test)]
mod tests;
