use crate::hasher::HashToken;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// Reverse lookup with a token that names no stored entry.
    #[error("no entry is stored under hash token `{0}`")]
    UnknownHash(HashToken),
}
