//! Runtime values.

use larch_ir::node::FunDecl;
use larch_ir::visit::printer::fmt_number;
use larch_ir::{Name, Policy, StringInterner};

/// A Larch runtime value.
///
/// Functions borrow their declaration from the tree, so values never
/// outlive the translation unit they came from. Strings are interned
/// [`Name`]s; equal contents compare equal by identity.
#[derive(Debug)]
pub enum Value<'t, P: Policy> {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Name),
    Function(&'t FunDecl<P>),
    /// The built-in `clock()`: seconds since the interpreter started.
    NativeClock,
}

// Derived Clone would demand P: Clone; the variants are all copyable.
impl<P: Policy> Clone for Value<'_, P> {
    fn clone(&self) -> Self {
        match self {
            Value::Nil => Value::Nil,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::Str(s) => Value::Str(*s),
            Value::Function(decl) => Value::Function(decl),
            Value::NativeClock => Value::NativeClock,
        }
    }
}

impl<'t, P: Policy> Value<'t, P> {
    /// `nil` and `false` are falsey, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// The value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::NativeClock => "native function",
        }
    }

    /// Language-level equality. Values of different types are unequal;
    /// functions are equal only to themselves.
    pub fn equals(&self, other: &Value<'t, P>) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => std::ptr::eq(*a, *b),
            (Value::NativeClock, Value::NativeClock) => true,
            _ => false,
        }
    }

    /// Render the value the way `print` surfaces it.
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            Value::Nil => "nil".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => fmt_number(*n),
            Value::Str(s) => interner.lookup(*s).to_owned(),
            Value::Function(decl) => format!("<fn {}>", interner.lookup(decl.name)),
            Value::NativeClock => "<native fn clock>".to_owned(),
        }
    }
}
