//! Parse diagnostics.

use larch_ir::TokenKind;

/// A structured parse error. One error aborts exactly one statement; the
/// parser synchronizes and keeps going, accumulating errors as it does.
#[derive(thiserror::Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParseError {
    #[error("[line {line}:{column}] expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: TokenKind,
        line: u32,
        column: u32,
    },

    #[error("[line {line}:{column}] unexpected end of input")]
    UnexpectedEnd { line: u32, column: u32 },

    #[error("[line {line}:{column}] invalid assignment target")]
    InvalidAssignmentTarget { line: u32, column: u32 },
}
