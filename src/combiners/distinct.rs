//! Distinct-value counting: `DistinctCount`

use crate::reducer::{CombineFn, OrderSensitivity};
use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

/* ===================== DistinctCount<T> ===================== */

/// Count of **distinct** retained elements.
///
/// - Container: `HashSet<T>`
/// - Output: `u64`
///
/// Requires `T: Eq + Hash`.
#[derive(Clone, Copy, Debug)]
pub struct DistinctCount<T>(pub PhantomData<fn(T)>);
impl<T> DistinctCount<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
impl<T> Default for DistinctCount<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CombineFn<T, HashSet<T>, u64> for DistinctCount<T>
where
    T: 'static + Eq + Hash,
{
    fn create(&self) -> HashSet<T> {
        HashSet::new()
    }

    fn add_input(&self, acc: &mut HashSet<T>, v: T) {
        acc.insert(v);
    }

    fn merge(&self, acc: &mut HashSet<T>, other: HashSet<T>) {
        if acc.is_empty() {
            *acc = other;
        } else {
            acc.extend(other);
        }
    }

    fn finish(&self, acc: HashSet<T>) -> u64 {
        acc.len() as u64
    }

    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Unordered
    }
}
