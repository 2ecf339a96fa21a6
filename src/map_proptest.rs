#![cfg(test)]

// Property tests for the hashing kernel and HashMap, kept inside the crate
// next to the code they exercise.

use crate::hash_map::{HashMap, MutableMap};
use crate::hasher::hash_key;
use crate::key::{CallableRef, Key, KeyObject, ObjectRef};
use crate::map::Map;
use proptest::prelude::*;

#[derive(Debug)]
struct Plain(#[allow(dead_code)] usize);
impl KeyObject for Plain {}

#[derive(Debug)]
struct Stamp(i64);
impl KeyObject for Stamp {
    fn value_key(&self) -> Option<Key> {
        Some(Key::Int(self.0))
    }
}

// Keys hold `Rc`s, so strategies generate a description and each case
// materializes it against a per-case pool of objects and callables.
#[derive(Clone, Debug)]
enum KeyDesc {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<KeyDesc>),
    Object(usize),
    Stamp(i64),
    Callable(usize),
}

const POOL: usize = 3;

struct Pool {
    objects: Vec<ObjectRef>,
    callables: Vec<CallableRef>,
}

impl Pool {
    fn new() -> Self {
        Pool {
            objects: (0..POOL).map(|i| ObjectRef::new(Plain(i))).collect(),
            callables: (0..POOL)
                .map(|_| CallableRef::new(|_| Key::Null))
                .collect(),
        }
    }

    fn build(&self, desc: &KeyDesc) -> Key {
        match desc {
            KeyDesc::Null => Key::Null,
            KeyDesc::Bool(b) => Key::Bool(*b),
            KeyDesc::Int(i) => Key::Int(*i),
            KeyDesc::Float(x) => Key::Float(*x),
            KeyDesc::Str(s) => Key::Str(s.clone()),
            KeyDesc::Array(items) => Key::Array(items.iter().map(|s| self.build(s)).collect()),
            KeyDesc::Object(i) => Key::Object(self.objects[*i].clone()),
            // A fresh allocation every time: equal only by value.
            KeyDesc::Stamp(v) => Key::object(Stamp(*v)),
            KeyDesc::Callable(i) => Key::Callable(self.callables[*i].clone()),
        }
    }
}

fn arb_leaf() -> impl Strategy<Value = KeyDesc> {
    prop_oneof![
        Just(KeyDesc::Null),
        any::<bool>().prop_map(KeyDesc::Bool),
        (-2i64..3).prop_map(KeyDesc::Int),
        prop_oneof![
            Just(0.0f64),
            Just(-0.0f64),
            Just(1.0f64),
            Just(1.1f64),
            Just(f64::NAN)
        ]
        .prop_map(KeyDesc::Float),
        "[01;:sa.]{0,3}".prop_map(KeyDesc::Str),
        (0..POOL).prop_map(KeyDesc::Object),
        (0i64..2).prop_map(KeyDesc::Stamp),
        (0..POOL).prop_map(KeyDesc::Callable),
    ]
}

fn arb_key_desc() -> impl Strategy<Value = KeyDesc> {
    arb_leaf().prop_recursive(3, 16, 3, |inner| {
        proptest::collection::vec(inner, 0..3).prop_map(KeyDesc::Array)
    })
}

// Property: token equality coincides with key equality, and hashing is
// deterministic for equal inputs.
proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn prop_token_equality_matches_key_equality(a in arb_key_desc(), b in arb_key_desc()) {
        let pool = Pool::new();
        let ka = pool.build(&a);
        let kb = pool.build(&b);
        prop_assert_eq!(hash_key(&ka) == hash_key(&kb), ka == kb);
        prop_assert_eq!(hash_key(&ka), hash_key(&pool.build(&a)));
        prop_assert_eq!(&ka, &pool.build(&a));
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(KeyDesc, i32),
    Remove(KeyDesc),
    RemoveAll(Vec<KeyDesc>),
    Get(KeyDesc),
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        6 => (arb_key_desc(), any::<i32>()).prop_map(|(s, v)| Op::Put(s, v)),
        2 => arb_key_desc().prop_map(Op::Remove),
        1 => proptest::collection::vec(arb_key_desc(), 0..4).prop_map(Op::RemoveAll),
        3 => arb_key_desc().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..60)
}

fn model_pos(model: &[(Key, i32)], key: &Key) -> Option<usize> {
    model.iter().position(|(k, _)| k == key)
}

// Property: HashMap behaves like an insertion-ordered association list.
// Invariants exercised across random operation sequences:
// - put on an existing key replaces the value without moving the entry.
// - remove / remove_all report exactly the entries the model held.
// - get agrees with the model for present and absent keys.
// - iteration order, len and is_empty match the model after every op.
// - key(hash) resolves every stored token back to its key.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let pool = Pool::new();
        let mut sut: HashMap<i32> = HashMap::new();
        let mut model: Vec<(Key, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Put(s, v) => {
                    let k = pool.build(&s);
                    let prev = sut.put(k.clone(), v);
                    match model_pos(&model, &k) {
                        Some(i) => {
                            prop_assert_eq!(prev, Some(model[i].1));
                            model[i] = (k, v);
                        }
                        None => {
                            prop_assert_eq!(prev, None);
                            model.push((k, v));
                        }
                    }
                }
                Op::Remove(s) => {
                    let k = pool.build(&s);
                    let got = sut.remove(&k);
                    let want = model_pos(&model, &k).map(|i| model.remove(i).1);
                    prop_assert_eq!(got, want);
                }
                Op::RemoveAll(descs) => {
                    let keys: Vec<Key> = descs.iter().map(|s| pool.build(s)).collect();
                    let got = sut.remove_all(&keys);
                    let mut want = 0;
                    for k in &keys {
                        if let Some(i) = model_pos(&model, k) {
                            model.remove(i);
                            want += 1;
                        }
                    }
                    prop_assert_eq!(got, want);
                }
                Op::Get(s) => {
                    let k = pool.build(&s);
                    let want = model_pos(&model, &k).map(|i| &model[i].1);
                    prop_assert_eq!(sut.get(&k), want);
                    prop_assert_eq!(sut.contains_key(&k), want.is_some());
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let seen: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
            prop_assert_eq!(&seen, &model);
            for h in sut.hashes() {
                let k = sut.key(h);
                prop_assert!(k.is_ok());
                if let Ok(k) = k {
                    prop_assert_eq!(&hash_key(k), h);
                }
            }
        }
    }
}
