//! Lexical diagnostics.
//!
//! Lexical errors never stop the scan: the offending text is reported,
//! substituted or skipped, and tokenization continues.

/// A lexical error with its source position.
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum LexError {
    #[error("[line {line}:{column}] unexpected character {text:?}")]
    UnexpectedCharacter {
        text: String,
        line: u32,
        column: u32,
    },

    #[error("[line {line}:{column}] unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    #[error("[line {line}:{column}] invalid escape sequence '\\{escape}'")]
    InvalidEscape {
        escape: char,
        line: u32,
        column: u32,
    },

    #[error("[line {line}:{column}] malformed number literal {text:?}")]
    MalformedNumber {
        text: String,
        line: u32,
        column: u32,
    },
}
