//! Size Estimator Module
//!
//! Approximate byte cost of cached values. The numbers are flat per-type
//! heuristics, not real memory accounting.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

// == Heuristic Constants ==
/// Cost of a boolean
pub const BOOL_SIZE: usize = 4;

/// Cost of any numeric scalar
pub const NUMBER_SIZE: usize = 8;

/// Cost of a single char
pub const CHAR_SIZE: usize = 4;

/// Bytes charged per byte of string length
pub const STRING_BYTE_FACTOR: usize = 2;

/// Fallback for values whose shape cannot be inspected
pub const DEFAULT_ESTIMATE: usize = 1024;

// == Estimate Size Trait ==
/// Values that can report an approximate byte footprint.
///
/// Implementations must be cheap and must never panic.
pub trait EstimateSize {
    /// Returns the estimated size in bytes.
    fn estimate_size(&self) -> usize;
}

/// Estimates the size of any supported value.
pub fn estimate<T: EstimateSize + ?Sized>(value: &T) -> usize {
    value.estimate_size()
}

/// Heuristic cost of a string of `len` UTF-8 bytes.
pub fn string_size(len: usize) -> usize {
    len.saturating_mul(STRING_BYTE_FACTOR)
}

macro_rules! number_size {
    ($($t:ty),*) => {
        $(
            impl EstimateSize for $t {
                fn estimate_size(&self) -> usize {
                    NUMBER_SIZE
                }
            }
        )*
    };
}

number_size!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl EstimateSize for bool {
    fn estimate_size(&self) -> usize {
        BOOL_SIZE
    }
}

impl EstimateSize for char {
    fn estimate_size(&self) -> usize {
        CHAR_SIZE
    }
}

impl EstimateSize for () {
    fn estimate_size(&self) -> usize {
        0
    }
}

impl EstimateSize for str {
    fn estimate_size(&self) -> usize {
        string_size(self.len())
    }
}

impl EstimateSize for String {
    fn estimate_size(&self) -> usize {
        string_size(self.len())
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for &T {
    fn estimate_size(&self) -> usize {
        (**self).estimate_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Box<T> {
    fn estimate_size(&self) -> usize {
        (**self).estimate_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Arc<T> {
    fn estimate_size(&self) -> usize {
        (**self).estimate_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Rc<T> {
    fn estimate_size(&self) -> usize {
        (**self).estimate_size()
    }
}

impl<T: EstimateSize> EstimateSize for Option<T> {
    fn estimate_size(&self) -> usize {
        self.as_ref().map_or(0, EstimateSize::estimate_size)
    }
}

impl<T: EstimateSize> EstimateSize for [T] {
    fn estimate_size(&self) -> usize {
        self.iter()
            .fold(0usize, |acc, item| acc.saturating_add(item.estimate_size()))
    }
}

impl<T: EstimateSize> EstimateSize for Vec<T> {
    fn estimate_size(&self) -> usize {
        self.as_slice().estimate_size()
    }
}

impl<K: EstimateSize, V: EstimateSize, S> EstimateSize for HashMap<K, V, S> {
    fn estimate_size(&self) -> usize {
        self.iter().fold(0usize, |acc, (k, v)| {
            acc.saturating_add(k.estimate_size())
                .saturating_add(v.estimate_size())
        })
    }
}

impl<K: EstimateSize, V: EstimateSize> EstimateSize for BTreeMap<K, V> {
    fn estimate_size(&self) -> usize {
        self.iter().fold(0usize, |acc, (k, v)| {
            acc.saturating_add(k.estimate_size())
                .saturating_add(v.estimate_size())
        })
    }
}

impl<A: EstimateSize, B: EstimateSize> EstimateSize for (A, B) {
    fn estimate_size(&self) -> usize {
        self.0.estimate_size().saturating_add(self.1.estimate_size())
    }
}

impl<A: EstimateSize, B: EstimateSize, C: EstimateSize> EstimateSize for (A, B, C) {
    fn estimate_size(&self) -> usize {
        self.0
            .estimate_size()
            .saturating_add(self.1.estimate_size())
            .saturating_add(self.2.estimate_size())
    }
}

impl EstimateSize for serde_json::Value {
    fn estimate_size(&self) -> usize {
        use serde_json::Value;

        match self {
            Value::Null => 0,
            Value::Bool(_) => BOOL_SIZE,
            Value::Number(_) => NUMBER_SIZE,
            Value::String(s) => string_size(s.len()),
            Value::Array(items) => items.as_slice().estimate_size(),
            Value::Object(map) => map.iter().fold(0usize, |acc, (k, v)| {
                acc.saturating_add(string_size(k.len()))
                    .saturating_add(v.estimate_size())
            }),
        }
    }
}

impl EstimateSize for chrono::DateTime<chrono::Utc> {
    fn estimate_size(&self) -> usize {
        NUMBER_SIZE
    }
}

/// Wrapper for values with no meaningful shape to inspect.
///
/// Always charged [`DEFAULT_ESTIMATE`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque<T>(pub T);

impl<T> EstimateSize for Opaque<T> {
    fn estimate_size(&self) -> usize {
        DEFAULT_ESTIMATE
    }
}
