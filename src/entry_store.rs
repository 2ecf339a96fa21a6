//! EntryStore: insertion-ordered storage of `(HashToken, Key, V)` entries.
//!
//! Entries live in a `SlotMap` and are threaded into a doubly linked list in
//! first-insertion order. A `HashTable` of slot keys indexes them by token;
//! each entry keeps the `u64` hash of its token so the index can grow without
//! re-hashing tokens. Overwriting an existing token updates the entry in
//! place and never moves it in the order.

use crate::error::{MapError, Result};
use crate::hasher::HashToken;
use crate::key::Key;
use core::fmt;
use core::hash::BuildHasher;
use core::mem;
use hashbrown::hash_table::Entry as TableEntry;
use hashbrown::HashTable;
use log::trace;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

#[derive(Clone, Debug)]
struct Entry<V> {
    token: HashToken,
    key: Key,
    value: V,
    hash: u64,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Clone)]
pub struct EntryStore<V, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry<V>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<V> EntryStore<V> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<V> Default for EntryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in insertion order.
pub struct Iter<'a, V> {
    slots: &'a SlotMap<DefaultKey, Entry<V>>,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a HashToken, &'a Key, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.slots.get(self.cursor?)?;
        self.cursor = e.next;
        self.remaining -= 1;
        Some((&e.token, &e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V, S> EntryStore<V, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    fn make_hash(&self, token: &HashToken) -> u64 {
        self.hasher.hash_one(token)
    }

    fn find_slot(&self, token: &HashToken) -> Option<DefaultKey> {
        let hash = self.make_hash(token);
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|e| e.token == *token)
                    .unwrap_or(false)
            })
            .copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, token: &HashToken) -> bool {
        self.find_slot(token).is_some()
    }

    /// Appends a new entry, or overwrites key and value in place when the
    /// token is already stored. Returns the replaced pair on overwrite.
    pub fn insert(&mut self, token: HashToken, key: Key, value: V) -> Option<(Key, V)> {
        let hash = self.make_hash(&token);
        match self.index.entry(
            hash,
            |&kk| {
                self.slots
                    .get(kk)
                    .map(|e| e.token == token)
                    .unwrap_or(false)
            },
            |&kk| self.slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            TableEntry::Occupied(o) => {
                let e = &mut self.slots[*o.get()];
                trace!("entry store: overwriting entry {}", e.token);
                let old_key = mem::replace(&mut e.key, key);
                let old_value = mem::replace(&mut e.value, value);
                Some((old_key, old_value))
            }
            TableEntry::Vacant(v) => {
                let prev = self.tail;
                let slot = self.slots.insert(Entry {
                    token,
                    key,
                    value,
                    hash,
                    prev,
                    next: None,
                });
                let _ = v.insert(slot);
                match prev {
                    Some(p) => self.slots[p].next = Some(slot),
                    None => self.head = Some(slot),
                }
                self.tail = Some(slot);
                None
            }
        }
    }

    pub fn lookup(&self, token: &HashToken) -> Option<&V> {
        let slot = self.find_slot(token)?;
        self.slots.get(slot).map(|e| &e.value)
    }

    pub fn lookup_mut(&mut self, token: &HashToken) -> Option<&mut V> {
        let slot = self.find_slot(token)?;
        self.slots.get_mut(slot).map(|e| &mut e.value)
    }

    /// Original key stored under `token`.
    pub fn lookup_key(&self, token: &HashToken) -> Result<&Key> {
        self.find_slot(token)
            .and_then(|slot| self.slots.get(slot))
            .map(|e| &e.key)
            .ok_or_else(|| MapError::UnknownHash(token.clone()))
    }

    pub fn remove(&mut self, token: &HashToken) -> Option<(Key, V)> {
        let hash = self.make_hash(token);
        let slots = &self.slots;
        let found = self
            .index
            .find_entry(hash, |&k| {
                slots.get(k).map(|e| e.token == *token).unwrap_or(false)
            })
            .ok()?;
        let slot = *found.get();
        found.remove();

        let entry = self.slots.remove(slot)?;
        self.unlink(entry.prev, entry.next);
        trace!("entry store: removed entry {}", entry.token);
        Some((entry.key, entry.value))
    }

    fn unlink(&mut self, prev: Option<DefaultKey>, next: Option<DefaultKey>) {
        match prev.and_then(|p| self.slots.get_mut(p)) {
            Some(e) => e.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slots.get_mut(n)) {
            Some(e) => e.prev = prev,
            None => self.tail = prev,
        }
    }

    pub fn clear(&mut self) {
        trace!("entry store: clearing {} entries", self.slots.len());
        self.index.clear();
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.slots.len(),
        }
    }
}

impl<V: fmt::Debug, S: BuildHasher> fmt::Debug for EntryStore<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
