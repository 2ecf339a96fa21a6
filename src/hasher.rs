//! KeyHasher: maps every `Key` to a canonical `HashToken`.
//!
//! Tokens form a prefix-free language. Each one starts with a tag letter
//! unique to its variant and is self-delimiting, so two tokens are equal
//! exactly when the keys they encode are equal:
//!
//! ```text
//! Null                 n;
//! Bool                 b1;  b0;
//! Int                  i<decimal>;
//! Float                f<shortest round-trip repr>;
//! Str                  s<byte len>:<bytes>;
//! Array                a<count>:<element tokens...>;
//! Object (value eq)    v<type len>:<type name><value token>;
//! Object (identity)    o<handle id>;
//! Callable             c<handle id>;
//! ```
//!
//! Identity tokens embed the handle id drawn when the object or callable was
//! wrapped. Ids are never reused within a thread, so a token kept after its
//! key was dropped can never name a later key. Tokens are not stable across
//! processes.

use crate::key::Key;
use core::fmt::{self, Write};

/// Canonical, opaque encoding of a `Key`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashToken(String);

impl HashToken {
    pub fn of(key: &Key) -> Self {
        let mut out = String::new();
        write_token(key, &mut out);
        HashToken(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hash a key into its canonical token.
pub fn hash_key(key: &Key) -> HashToken {
    HashToken::of(key)
}

fn write_token(key: &Key, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = match key {
        Key::Null => out.write_str("n;"),
        Key::Bool(true) => out.write_str("b1;"),
        Key::Bool(false) => out.write_str("b0;"),
        Key::Int(i) => write!(out, "i{};", i),
        Key::Float(x) => write!(out, "f{:?};", x),
        Key::Str(s) => write!(out, "s{}:{};", s.len(), s),
        Key::Array(items) => {
            let _ = write!(out, "a{}:", items.len());
            for item in items {
                write_token(item, out);
            }
            out.write_str(";")
        }
        Key::Object(o) => match o.get().value_key() {
            Some(value) => {
                let type_name = o.get().type_name();
                let _ = write!(out, "v{}:{}", type_name.len(), type_name);
                write_token(&value, out);
                out.write_str(";")
            }
            None => write!(out, "o{};", o.id()),
        },
        Key::Callable(c) => write!(out, "c{};", c.id()),
    };
}

impl fmt::Display for HashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for HashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashToken({:?})", self.0)
    }
}

/// Rebuild a token from text, e.g. one previously obtained via `as_str`.
impl From<String> for HashToken {
    fn from(s: String) -> Self {
        HashToken(s)
    }
}

impl From<&str> for HashToken {
    fn from(s: &str) -> Self {
        HashToken(s.to_string())
    }
}
