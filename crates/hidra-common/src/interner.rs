//! String interning for member and type names.
//!
//! Every name in the member graph is interned once when the graph is built.
//! Name lookups during resolution then compare `Atom`s (a `u32`) instead of
//! strings.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An interned string handle.
///
/// `Atom`s are only meaningful relative to the `Interner` that produced them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty string; always the first atom of every interner.
    pub const EMPTY: Self = Self(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// Append-only string table.
#[derive(Clone)]
pub struct Interner {
    map: FxHashMap<Arc<str>, Atom>,
    strings: Vec<Arc<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Atom::EMPTY);
        interner
    }

    /// Intern `text`, returning the existing atom if it was seen before.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let idx = u32::try_from(self.strings.len()).unwrap_or(u32::MAX);
        let atom = Atom(idx);
        let shared: Arc<str> = Arc::from(text);
        self.strings.push(Arc::clone(&shared));
        self.map.insert(shared, atom);
        atom
    }

    /// Look up an already interned string without interning it.
    pub fn lookup(&self, text: &str) -> Option<Atom> {
        self.map.get(text).copied()
    }

    /// Resolve an atom back to its text.
    ///
    /// Atoms from a different interner resolve to the empty string.
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings.get(atom.index()).map_or("", |s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always present.
        self.strings.len() <= 1
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.strings.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
