//! String interner backing [`Name`] identities.
//!
//! Interning gives every distinct piece of text a stable `u32` identity;
//! lexemes, identifiers and string literals are compared by identity from
//! then on. The interner is shared between the lexer thread and the parser
//! thread, so lookups take a read lock and only first-time interning takes
//! the write lock.

// Arc is needed so the lexer and parser threads can share one interner.
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct InternTable {
    /// Map from string content to index in `strings`.
    map: FxHashMap<&'static str, u32>,
    /// Storage for interned contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        // Pre-intern the empty string at index 0 so Name::EMPTY is valid.
        let empty: &'static str = "";
        table.map.insert(empty, 0);
        table.strings.push(empty);
        table
    }
}

/// Thread-safe string interner.
///
/// `intern` is O(1) amortized; `lookup` is O(1). Interned strings live as
/// long as the process (they are leaked to get `'static` lifetime), which
/// is fine for a compiler front-end where the set of distinct lexemes is
/// bounded by the input.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the empty string pre-interned.
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Intern a string, returning its stable identity.
    pub fn intern(&self, text: &str) -> Name {
        // Fast path: already interned.
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(text) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(text) {
            return Name::from_raw(idx);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let idx = u32::try_from(guard.strings.len()).unwrap_or_else(|_| {
            // Over 4 billion distinct strings; not reachable with real input.
            panic!("string interner overflow")
        });
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Resolve a `Name` back to its text.
    ///
    /// # Panics
    ///
    /// Panics if `name` did not come from this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings[name.raw() as usize]
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Returns `true` if only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        StringInterner::new()
    }
}

/// Shared handle to a [`StringInterner`].
pub type SharedInterner = Arc<StringInterner>;

#[cfg(test)]
mod tests;
