//! HashMap: the mutable map. It composes a `ReadOnlyMap` and adds the
//! mutators of [`MutableMap`], writing straight through to the entry store.

use crate::entry_store::EntryStore;
use crate::hasher::HashToken;
use crate::key::Key;
use crate::map::{Iter, Map, ReadOnlyMap};
use core::fmt;
use log::debug;

/// Mutation operations. Each one either applies fully or leaves the map
/// untouched; none can fail.
pub trait MutableMap: Map {
    /// Stores `value` under `key`, returning the value it replaced. An
    /// existing entry keeps its position.
    fn put(&mut self, key: impl Into<Key>, value: Self::Value) -> Option<Self::Value>;

    fn put_all<K, I>(&mut self, pairs: I)
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Self::Value)>;

    fn get_mut(&mut self, key: &Key) -> Option<&mut Self::Value>;

    fn remove(&mut self, key: &Key) -> Option<Self::Value>;

    /// Removes every given key that is present; returns how many were.
    fn remove_all<'k, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'k Key>;

    fn clear(&mut self);
}

#[derive(Clone)]
pub struct HashMap<V> {
    inner: ReadOnlyMap<V>,
}

impl<V> HashMap<V> {
    pub fn new() -> Self {
        HashMap {
            inner: ReadOnlyMap::new(),
        }
    }

    /// Keys are the 0-based positions of the values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        HashMap {
            inner: ReadOnlyMap::from_values(values),
        }
    }

    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        HashMap {
            inner: ReadOnlyMap::from_pairs(pairs),
        }
    }

    pub fn from_map<M>(other: &M) -> Self
    where
        M: Map<Value = V> + ?Sized,
        V: Clone,
    {
        HashMap {
            inner: ReadOnlyMap::from_map(other),
        }
    }

    pub fn as_read_only(&self) -> &ReadOnlyMap<V> {
        &self.inner
    }

    /// Freezes the map; no entries are copied.
    pub fn into_read_only(self) -> ReadOnlyMap<V> {
        self.inner
    }

    fn store_mut(&mut self) -> &mut EntryStore<V> {
        self.inner.store_mut()
    }
}

impl<V> Map for HashMap<V> {
    type Value = V;

    fn entries(&self) -> &EntryStore<V> {
        self.inner.entries()
    }
}

impl<V> MutableMap for HashMap<V> {
    fn put(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        let key = key.into();
        let token = HashToken::of(&key);
        self.store_mut().insert(token, key, value).map(|(_k, v)| v)
    }

    fn put_all<K, I>(&mut self, pairs: I)
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let before = self.len();
        for (k, v) in pairs {
            self.put(k, v);
        }
        debug!("put_all: {} -> {} entries", before, self.len());
    }

    fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        self.store_mut().lookup_mut(&HashToken::of(key))
    }

    fn remove(&mut self, key: &Key) -> Option<V> {
        self.store_mut()
            .remove(&HashToken::of(key))
            .map(|(_k, v)| v)
    }

    fn remove_all<'k, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'k Key>,
    {
        let removed = keys
            .into_iter()
            .filter(|k| self.remove(k).is_some())
            .count();
        debug!("remove_all: removed {} entries", removed);
        removed
    }

    fn clear(&mut self) {
        self.store_mut().clear();
    }
}

impl<V> Default for HashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<HashMap<V>> for ReadOnlyMap<V> {
    fn from(map: HashMap<V>) -> Self {
        map.into_read_only()
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for HashMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for HashMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<'a, V> IntoIterator for &'a HashMap<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
