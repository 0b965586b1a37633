//! Tokens produced by the lexer and consumed by the parser.

use std::fmt;

use crate::Name;

/// Token kinds for Larch.
///
/// Number literals store their `f64` bits so the kind stays `Eq + Hash`;
/// string literals and identifiers carry their interned [`Name`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    // Single-character punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character operators
    Bang,
    BangEq,
    Eq,
    EqEq,
    Gt,
    GtEq,
    Lt,
    LtEq,

    // Literals
    /// Identifier (interned).
    Ident(Name),
    /// String literal value (interned, escapes already applied).
    Str(Name),
    /// Number literal, stored as `f64` bits for Eq/Hash.
    Number(u64),

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
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

    /// Line boundary; significant to the REPL and the channel flush predicate.
    Newline,
    /// End of input; the producer's terminal token.
    Eof,
}

impl TokenKind {
    /// Wrap an `f64` literal value.
    #[inline]
    pub fn number(value: f64) -> Self {
        TokenKind::Number(value.to_bits())
    }

    /// The `f64` value of a `Number` token, if this is one.
    #[inline]
    pub fn number_value(self) -> Option<f64> {
        match self {
            TokenKind::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// Returns `true` for kinds that begin a declaration or statement the
    /// grammar has a rule for.
    ///
    /// Used by parser error recovery to find a safe restart point. `class`
    /// is deliberately absent: it is lexed but has no statement rule, so
    /// recovery must consume it rather than stop in front of it.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Semicolon => "';'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Bang => "'!'",
            TokenKind::BangEq => "'!='",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Str(_) => "string literal",
            TokenKind::Number(_) => "number literal",
            TokenKind::And => "'and'",
            TokenKind::Class => "'class'",
            TokenKind::Else => "'else'",
            TokenKind::False => "'false'",
            TokenKind::For => "'for'",
            TokenKind::Fun => "'fun'",
            TokenKind::If => "'if'",
            TokenKind::Nil => "'nil'",
            TokenKind::Or => "'or'",
            TokenKind::Print => "'print'",
            TokenKind::Return => "'return'",
            TokenKind::Super => "'super'",
            TokenKind::This => "'this'",
            TokenKind::True => "'true'",
            TokenKind::Var => "'var'",
            TokenKind::While => "'while'",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A single token with its source position.
///
/// `lexeme` is the interned source text of the token; operator tokens stored
/// in tree nodes keep it so printers can render the operator without a
/// keyword table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Name,
    pub line: u32,
    pub column: u32,
}

impl Token {
    /// Construct a token.
    pub fn new(kind: TokenKind, lexeme: Name, line: u32, column: u32) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// The terminal end-of-input token.
    pub fn eof(line: u32, column: u32) -> Self {
        Token::new(TokenKind::Eof, Name::EMPTY, line, column)
    }

    /// `f64` value of a number token.
    #[inline]
    pub fn number_value(&self) -> Option<f64> {
        self.kind.number_value()
    }
}
