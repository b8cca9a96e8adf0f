//! String interner for binding names.
//!
//! Galaxy programs have a few hundred distinct names (`:1029`, `galaxy`,
//! builtins), so a single map suffices. Interning keeps `Reference` nodes
//! at a fixed small size and makes environment lookups integer hashes.

use rustc_hash::FxHashMap;

use crate::Name;

/// Owns the text behind every [`Name`].
#[derive(Clone, Debug, Default)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing name if it was seen before.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let raw = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} names", u32::MAX));
        let name = Name::from_raw(raw);
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Look up a name without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Text of an interned name.
    ///
    /// # Panics
    /// Panics if `name` came from a different interner.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut interner = StringInterner::new();
        let a = interner.intern(":1029");
        let b = interner.intern(":1029");
        let c = interner.intern("galaxy");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn lookup_round_trips() {
        let mut interner = StringInterner::new();
        let name = interner.intern("multipledraw");
        assert_eq!(interner.lookup(name), "multipledraw");
        assert_eq!(interner.get("multipledraw"), Some(name));
        assert_eq!(interner.get("checkerboard"), None);
    }
}
