//! Map: the read-only query surface shared by every map type, and
//! `ReadOnlyMap`, the map that offers nothing else.
//!
//! Every query hashes the caller's key with [`hash_key`](crate::hash_key)
//! and looks the token up in the backing [`EntryStore`]; stored keys are
//! never compared against the caller's key directly.
//!
//! `ReadOnlyMap` has no mutators at all. Code that holds one cannot change
//! it:
//!
//! ```compile_fail
//! use tagged_collections::ReadOnlyMap;
//! let mut m = ReadOnlyMap::from_values(vec!["one"]);
//! m.put("test", "test");
//! ```
//!
//! ```compile_fail
//! use tagged_collections::ReadOnlyMap;
//! let mut m = ReadOnlyMap::from_values(vec!["one"]);
//! m.put_all(vec![("one", "one"), ("two", "two")]);
//! ```
//!
//! ```compile_fail
//! use tagged_collections::{Key, ReadOnlyMap};
//! let mut m = ReadOnlyMap::from_values(vec!["one"]);
//! m.remove(&Key::Int(0));
//! ```
//!
//! ```compile_fail
//! use tagged_collections::{Key, ReadOnlyMap};
//! let mut m = ReadOnlyMap::from_values(vec!["one"]);
//! m.remove_all(&[Key::Int(0)]);
//! ```
//!
//! ```compile_fail
//! use tagged_collections::ReadOnlyMap;
//! let mut m = ReadOnlyMap::from_values(vec!["one"]);
//! m.clear();
//! ```

use crate::entry_store::{self, EntryStore};
use crate::error::Result;
use crate::hasher::HashToken;
use crate::key::Key;
use crate::list::List;
use crate::set::KeySet;
use core::fmt;
use log::debug;

/// Query operations over an insertion-ordered, `Key`-indexed map.
pub trait Map {
    type Value;

    /// Backing storage.
    fn entries(&self) -> &EntryStore<Self::Value>;

    /// Value stored under `key`, or `None` when absent.
    fn get(&self, key: &Key) -> Option<&Self::Value> {
        self.entries().lookup(&HashToken::of(key))
    }

    /// Original key stored under `hash`.
    ///
    /// Fails with [`MapError::UnknownHash`](crate::MapError::UnknownHash)
    /// when no entry carries that token.
    fn key(&self, hash: &HashToken) -> Result<&Key> {
        self.entries().lookup_key(hash)
    }

    fn contains_key(&self, key: &Key) -> bool {
        self.entries().contains(&HashToken::of(key))
    }

    /// True iff every given key is present; true for an empty input.
    fn contains_keys<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k Key>,
    {
        keys.into_iter().all(|k| self.contains_key(k))
    }

    /// Linear scan by value equality; values are not indexed.
    fn contains_value(&self, value: &Self::Value) -> bool
    where
        Self::Value: PartialEq,
    {
        self.entries().iter().any(|(_t, _k, v)| v == value)
    }

    /// True iff every given value is present; true for an empty input.
    fn contains_values<'v, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v Self::Value>,
        Self::Value: PartialEq + 'v,
    {
        values.into_iter().all(|v| self.contains_value(v))
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Original keys in entry order.
    fn key_set(&self) -> KeySet {
        self.iter().map(|(k, _v)| k.clone()).collect()
    }

    /// Values in entry order.
    fn values(&self) -> List<Self::Value>
    where
        Self::Value: Clone,
    {
        self.iter().map(|(_k, v)| v.clone()).collect()
    }

    fn iter(&self) -> Iter<'_, Self::Value> {
        Iter {
            it: self.entries().iter(),
        }
    }

    /// Tokens in entry order, for pairing iteration with [`Map::key`].
    fn hashes(&self) -> Hashes<'_, Self::Value> {
        Hashes {
            it: self.entries().iter(),
        }
    }
}

/// Iterator over `(key, value)` pairs in entry order.
pub struct Iter<'a, V> {
    it: entry_store::Iter<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_t, k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over hash tokens in entry order.
pub struct Hashes<'a, V> {
    it: entry_store::Iter<'a, V>,
}

impl<'a, V> Iterator for Hashes<'a, V> {
    type Item = &'a HashToken;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(t, _k, _v)| t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<V> ExactSizeIterator for Hashes<'_, V> {}

/// A map that can be built and queried but never changed.
#[derive(Clone)]
pub struct ReadOnlyMap<V> {
    store: EntryStore<V>,
}

impl<V> ReadOnlyMap<V> {
    pub fn new() -> Self {
        ReadOnlyMap {
            store: EntryStore::new(),
        }
    }

    /// Keys are the 0-based positions of the values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::from_pairs((0i64..).zip(values))
    }

    /// Keys and values taken verbatim; a repeated key overwrites the earlier
    /// value without moving it.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut store = EntryStore::new();
        for (k, v) in pairs {
            let key = k.into();
            store.insert(HashToken::of(&key), key, v);
        }
        ReadOnlyMap { store }
    }

    /// Copies keys and values of another map; object keys keep their identity.
    pub fn from_map<M>(other: &M) -> Self
    where
        M: Map<Value = V> + ?Sized,
        V: Clone,
    {
        let mut store = EntryStore::new();
        for (t, k, v) in other.entries().iter() {
            store.insert(t.clone(), k.clone(), v.clone());
        }
        debug!("copied {} entries from another map", store.len());
        ReadOnlyMap { store }
    }

    pub(crate) fn store_mut(&mut self) -> &mut EntryStore<V> {
        &mut self.store
    }
}

impl<V> Map for ReadOnlyMap<V> {
    type Value = V;

    fn entries(&self) -> &EntryStore<V> {
        &self.store
    }
}

impl<V> Default for ReadOnlyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for ReadOnlyMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a, V> IntoIterator for &'a ReadOnlyMap<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for ReadOnlyMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
