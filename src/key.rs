//! Key: the closed set of values that can serve as map keys.
//!
//! Equality is variant-sensitive: `Int(1)`, `Float(1.0)` and `Str("1")` are
//! three different keys. Objects compare by identity unless their type opts
//! into value equality through [`KeyObject::value_key`]; callables always
//! compare by identity.

use core::cell::Cell;
use core::fmt;
use core::num::TryFromIntError;
use std::rc::Rc;

/// Capability implemented by user types that are stored as object keys.
///
/// The default is identity equality: two distinct allocations are distinct
/// keys even when their fields match. A type that has a logical value
/// overrides [`value_key`](KeyObject::value_key) and reports it as a `Key`.
pub trait KeyObject: fmt::Debug {
    /// Logical value of this object, or `None` to compare by identity.
    fn value_key(&self) -> Option<Key> {
        None
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

// Handles are `!Send`, so a per-thread counter gives ids that are unique
// among every handle that can ever meet in one map.
fn next_id() -> u64 {
    NEXT_ID.with(|c| {
        let id = c.get();
        c.set(id + 1);
        id
    })
}

/// Shared handle to an object key. Each construction draws a fresh id that
/// is never reused; clones share the allocation and the id.
#[derive(Clone)]
pub struct ObjectRef {
    id: u64,
    object: Rc<dyn KeyObject>,
}

impl ObjectRef {
    pub fn new<T: KeyObject + 'static>(object: T) -> Self {
        Self::from_rc(Rc::new(object))
    }

    /// Wraps an existing allocation under a new identity. Clone the returned
    /// handle, not the `Rc`, to share identity.
    pub fn from_rc<T: KeyObject + 'static>(object: Rc<T>) -> Self {
        ObjectRef {
            id: next_id(),
            object,
        }
    }

    pub fn get(&self) -> &dyn KeyObject {
        &*self.object
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.object, f)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.object.value_key(), other.object.value_key()) {
            (Some(a), Some(b)) => self.object.type_name() == other.object.type_name() && a == b,
            _ => false,
        }
    }
}

impl Eq for ObjectRef {}

type CallableFn = dyn Fn(&[Key]) -> Key;

/// Shared handle to a callable key, compared by identity only. Identity
/// follows the same never-reused ids as [`ObjectRef`].
#[derive(Clone)]
pub struct CallableRef {
    id: u64,
    f: Rc<CallableFn>,
}

impl CallableRef {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Key]) -> Key + 'static,
    {
        CallableRef {
            id: next_id(),
            f: Rc::new(f),
        }
    }

    pub fn call(&self, args: &[Key]) -> Key {
        (self.f)(args)
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn ptr_eq(&self, other: &CallableRef) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallableRef(#{})", self.id)
    }
}

impl PartialEq for CallableRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for CallableRef {}

/// A map key.
#[derive(Clone, Debug)]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Ordered sequence of sub-keys; order is significant.
    Array(Vec<Key>),
    Object(ObjectRef),
    Callable(CallableRef),
}

impl Key {
    pub fn null() -> Self {
        Key::Null
    }

    pub fn object<T: KeyObject + 'static>(object: T) -> Self {
        Key::Object(ObjectRef::new(object))
    }

    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Key]) -> Key + 'static,
    {
        Key::Callable(CallableRef::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Key::Null)
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Key::Null => "null",
            Key::Bool(_) => "bool",
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Str(_) => "string",
            Key::Array(_) => "array",
            Key::Object(_) => "object",
            Key::Callable(_) => "callable",
        }
    }
}

// Must agree with the token encoding in `hasher`: NaNs are one key, signed
// zeros are two.
fn float_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Null, Key::Null) => true,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => float_eq(*a, *b),
            (Key::Str(a), Key::Str(b)) => a == b,
            (Key::Array(a), Key::Array(b)) => a == b,
            (Key::Object(a), Key::Object(b)) => a == b,
            (Key::Callable(a), Key::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => f.write_str("null"),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Float(x) => write!(f, "{:?}", x),
            Key::Str(s) => write!(f, "{:?}", s),
            Key::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Key::Object(o) => write!(f, "<{}>", o.get().type_name()),
            Key::Callable(_) => f.write_str("<callable>"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Int(i64::from(i))
    }
}

/// Fails for indices above `i64::MAX` instead of wrapping.
impl TryFrom<usize> for Key {
    type Error = TryFromIntError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        i64::try_from(i).map(Key::Int)
    }
}

impl From<f64> for Key {
    fn from(x: f64) -> Self {
        Key::Float(x)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<Vec<Key>> for Key {
    fn from(items: Vec<Key>) -> Self {
        Key::Array(items)
    }
}

impl From<ObjectRef> for Key {
    fn from(o: ObjectRef) -> Self {
        Key::Object(o)
    }
}

impl From<CallableRef> for Key {
    fn from(c: CallableRef) -> Self {
        Key::Callable(c)
    }
}

impl<T: Into<Key>> From<Option<T>> for Key {
    fn from(v: Option<T>) -> Self {
        v.map_or(Key::Null, Into::into)
    }
}
