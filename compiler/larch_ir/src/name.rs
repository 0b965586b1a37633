//! Interned string identity.

use std::fmt;

/// An interned string.
///
/// Two `Name`s compare equal iff they were interned from the same text,
/// so equality is a single `u32` comparison. The raw index is only
/// meaningful together with the [`StringInterner`](crate::StringInterner)
/// that produced it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// The pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Construct from a raw index. Only the interner should call this.
    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Raw index into the interner's table.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
