//! Container-building reducers: `ToVec`, `ToSet`, `ToBTreeSet`

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::reducer::{CombineFn, OrderSensitivity};

/* ===================== ToVec<T> ===================== */

/// Every retained element, in encounter order.
///
/// - Container: `Vec<T>`
/// - Output: `Vec<T>`
///
/// Duplicates are kept. This is the default downstream of
/// [`FirstRank`](crate::FirstRank).
#[derive(Clone, Copy, Debug)]
pub struct ToVec<T>(pub PhantomData<fn(T)>);
impl<T> ToVec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
impl<T> Default for ToVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> CombineFn<T, Vec<T>, Vec<T>> for ToVec<T> {
    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        if acc.is_empty() {
            *acc = other;
        } else {
            acc.append(&mut other);
        }
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}

/* ===================== ToSet<T> ===================== */

/// Distinct retained elements in a `HashSet` (requires `T: Eq + Hash`).
#[derive(Clone, Copy, Debug)]
pub struct ToSet<T>(pub PhantomData<fn(T)>);
impl<T> ToSet<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
impl<T> Default for ToSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CombineFn<T, HashSet<T>, HashSet<T>> for ToSet<T>
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
        if acc.len() < other.len() {
            let mut bigger = other;
            bigger.extend(std::mem::take(acc));
            *acc = bigger;
        } else {
            acc.extend(other);
        }
    }

    fn finish(&self, acc: HashSet<T>) -> HashSet<T> {
        acc
    }

    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Unordered
    }
}

/* ===================== ToBTreeSet<T> ===================== */

/// Distinct retained elements, sorted by `Ord`.
///
/// The output is sorted regardless of encounter order, so the reducer
/// reports itself as unordered.
#[derive(Clone, Copy, Debug)]
pub struct ToBTreeSet<T>(pub PhantomData<fn(T)>);
impl<T> ToBTreeSet<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
impl<T> Default for ToBTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CombineFn<T, BTreeSet<T>, BTreeSet<T>> for ToBTreeSet<T>
where
    T: 'static + Ord,
{
    fn create(&self) -> BTreeSet<T> {
        BTreeSet::new()
    }

    fn add_input(&self, acc: &mut BTreeSet<T>, v: T) {
        acc.insert(v);
    }

    fn merge(&self, acc: &mut BTreeSet<T>, mut other: BTreeSet<T>) {
        acc.append(&mut other);
    }

    fn finish(&self, acc: BTreeSet<T>) -> BTreeSet<T> {
        acc
    }

    fn order(&self) -> OrderSensitivity {
        OrderSensitivity::Unordered
    }
}
