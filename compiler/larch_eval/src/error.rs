//! Runtime diagnostics.

/// An error raised while evaluating a program. Evaluation stops at the
/// first one; there is no runtime recovery.
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum RuntimeError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("invalid operands for '{op}': {lhs} and {rhs}")]
    InvalidOperands {
        op: String,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("operand for '{op}' must be a number, got {operand}")]
    InvalidOperand { op: String, operand: &'static str },

    #[error("cannot call a {callee}")]
    NotCallable { callee: &'static str },

    #[error("'{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}
