//! KeySet: insertion-ordered set of keys, unique by hash token.

use crate::entry_store::{self, EntryStore};
use crate::hasher::HashToken;
use crate::key::Key;
use core::fmt;

#[derive(Clone, Default)]
pub struct KeySet {
    store: EntryStore<()>,
}

/// Iterator over the keys of a `KeySet` in insertion order.
pub struct Iter<'a> {
    it: entry_store::Iter<'a, ()>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Key;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_t, k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`; returns `false` if an equal key was already present, in
    /// which case the set is unchanged.
    pub fn insert(&mut self, key: impl Into<Key>) -> bool {
        let key = key.into();
        let token = HashToken::of(&key);
        if self.store.contains(&token) {
            return false;
        }
        self.store.insert(token, key, ());
        true
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.store.contains(&HashToken::of(key))
    }

    pub fn remove(&mut self, key: &Key) -> bool {
        self.store.remove(&HashToken::of(key)).is_some()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.store.iter(),
        }
    }

    /// Materializes the set as a vector of keys in insertion order.
    pub fn to_vec(&self) -> Vec<Key> {
        self.iter().cloned().collect()
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>> FromIterator<K> for KeySet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = KeySet::new();
        for k in iter {
            set.insert(k);
        }
        set
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: uniqueness follows key equality, so `1` and `"1"` coexist.
    #[test]
    fn uniqueness_is_variant_sensitive() {
        let mut s = KeySet::new();
        assert!(s.insert(1));
        assert!(s.insert("1"));
        assert!(s.insert(1.0));
        assert!(!s.insert(1));
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_vec(), vec![Key::Int(1), Key::from("1"), Key::Float(1.0)]);
    }

    #[test]
    fn contains_and_remove() {
        let mut s: KeySet = ["a", "b"].into_iter().collect();
        assert!(s.contains(&Key::from("a")));
        assert!(s.remove(&Key::from("a")));
        assert!(!s.remove(&Key::from("a")));
        assert!(!s.contains(&Key::from("a")));
        assert_eq!(s.iter().len(), 1);
        assert!(!s.is_empty());
    }
}
