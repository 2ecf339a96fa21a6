//! tagged-collections: insertion-ordered maps, lists and sets whose keys are
//! values of a closed, tagged key domain.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let strings, integers, floats, booleans, null, objects, arrays
//!   and callables all serve as keys of one map, without collisions between
//!   semantically different values.
//! - Layers:
//!   - `Key`: tagged union of the supported key variants. Objects opt into
//!     value equality through `KeyObject::value_key`; otherwise objects and
//!     callables compare by allocation identity.
//!   - `hash_key`: maps a `Key` to a canonical `HashToken`. The encoding is
//!     prefix-free, so `hash_key(a) == hash_key(b)` exactly when `a == b`.
//!   - `EntryStore<V>`: token-indexed, insertion-ordered storage of
//!     `(HashToken, Key, V)` entries.
//!   - `Map`: the read-only query surface (get, reverse `key` lookup,
//!     contains, key set, values, iteration), implemented once on top of
//!     `EntryStore`.
//!   - `ReadOnlyMap<V>` implements only `Map`; `HashMap<V>` composes one and
//!     adds `MutableMap`.
//!
//! Constraints
//! - Single-threaded: keys hold `Rc` handles, so maps are `!Send`/`!Sync`.
//! - Lookups never compare the caller's key with stored keys; they hash it
//!   and compare tokens.
//! - Overwriting a key updates its entry in place; the entry keeps its
//!   position in iteration order.
//! - Identity tokens embed per-handle ids that are never reused, so a token
//!   kept past its key's lifetime never resolves to another key. Tokens are
//!   not stable across processes.
//!
//! Mutation policy
//! - Mutability is a capability of the type. `ReadOnlyMap` has no `put`,
//!   `remove` or `clear`; code that holds one cannot change it, and the
//!   attempt fails to compile rather than failing at run time. `HashMap`
//!   can be frozen into a `ReadOnlyMap` without copying.
//!
//! Errors
//! - `get` on an absent key returns `None`.
//! - `key(hash)` with a token that names no entry returns
//!   `MapError::UnknownHash`.
//!
//! Example
//!
//! ```
//! use tagged_collections::{hash_key, HashMap, Key, Map, MutableMap};
//!
//! let mut m = HashMap::new();
//! m.put(1, "int");
//! m.put("1", "int string");
//! m.put(1.0, "float");
//! assert_eq!(m.len(), 3);
//! assert_eq!(m.get(&Key::from("1")), Some(&"int string"));
//! assert_eq!(m.key(&hash_key(&Key::Float(1.0))), Ok(&Key::Float(1.0)));
//! ```

pub mod entry_store;
mod error;
mod hash_map;
mod hasher;
mod key;
mod list;
mod map;
#[cfg(test)]
mod map_proptest;
mod set;

// Public surface
pub use error::{MapError, Result};
pub use hash_map::{HashMap, MutableMap};
pub use hasher::{hash_key, HashToken};
pub use key::{CallableRef, Key, KeyObject, ObjectRef};
pub use list::List;
pub use map::{Hashes, Iter, Map, ReadOnlyMap};
pub use set::{Iter as KeySetIter, KeySet};
