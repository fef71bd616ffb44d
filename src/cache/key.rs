//! Cache Key Module

use std::fmt;

use serde::Serialize;

// == Cache Key ==
/// Key of a cache entry: a string or an integer.
///
/// `Str("1")` and `Int(1)` are different keys. Unsigned integers that fit
/// in an `i64` become `Int`, so `5u64` and `5i64` name the same entry; only
/// values above `i64::MAX` use `UInt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum CacheKey {
    Str(String),
    Int(i64),
    UInt(u64),
}

impl CacheKey {
    /// Returns the string form if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CacheKey::Str(s) => Some(s),
            CacheKey::Int(_) | CacheKey::UInt(_) => None,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Str(s) => f.write_str(s),
            CacheKey::Int(n) => write!(f, "{}", n),
            CacheKey::UInt(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        CacheKey::Str(value.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        CacheKey::Str(value)
    }
}

impl From<&String> for CacheKey {
    fn from(value: &String) -> Self {
        CacheKey::Str(value.clone())
    }
}

impl From<i64> for CacheKey {
    fn from(value: i64) -> Self {
        CacheKey::Int(value)
    }
}

impl From<i32> for CacheKey {
    fn from(value: i32) -> Self {
        CacheKey::Int(i64::from(value))
    }
}

impl From<u64> for CacheKey {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => CacheKey::Int(n),
            Err(_) => CacheKey::UInt(value),
        }
    }
}
